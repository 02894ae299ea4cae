use std::fmt;

use serde::Serialize;

// card container
//  ├── p.ad__card-description   -> name
//  ├── p.ad__card-price        -> price_text ("CFA" and spacing stripped)
//  ├── p.ad__card-location
//  │    └── span               -> address
//  └── img.ad__card-img[src]   -> image_url

/// One classifieds card, as scraped. `price_text` keeps the text form;
/// numeric coercion happens in the cleaned projection, never here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub name: String,
    pub price_text: String,
    pub address: String,
    pub image_url: String,
    pub category: String,
    pub scraped_at: String,
}

/// Why a card container was dropped during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingName,
    MissingPrice,
    MissingLocation,
    MissingImage,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingName => write!(f, "missing name"),
            SkipReason::MissingPrice => write!(f, "missing price"),
            SkipReason::MissingLocation => write!(f, "missing location"),
            SkipReason::MissingImage => write!(f, "missing image"),
        }
    }
}

/// Result of extracting one page: kept listings plus one entry per
/// skipped container. Both empty means the page had no card containers.
#[derive(Debug, Default)]
pub struct PageExtract {
    pub listings: Vec<Listing>,
    pub skipped: Vec<SkipReason>,
}

impl PageExtract {
    pub fn is_empty_page(&self) -> bool {
        self.listings.is_empty() && self.skipped.is_empty()
    }
}

/// How a scrape run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// Every page up to the limit yielded listings.
    PageLimit,
    /// A page with no card containers was reached.
    Exhausted,
    /// A page failed to fetch; earlier pages were kept.
    FetchFailed(String),
}

impl Termination {
    pub fn label(&self) -> &'static str {
        match self {
            Termination::PageLimit => "page_limit",
            Termination::Exhausted => "exhausted",
            Termination::FetchFailed(_) => "fetch_failed",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::PageLimit => write!(f, "reached page limit"),
            Termination::Exhausted => write!(f, "no more listings"),
            Termination::FetchFailed(msg) => write!(f, "fetch failed: {msg}"),
        }
    }
}

/// Totals for one scrape run, reported to the caller and recorded on
/// the run row.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub pages_fetched: usize,
    pub rows: usize,
    pub skipped: usize,
    pub termination: Termination,
}
