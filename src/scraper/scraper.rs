// scraper.rs
use std::thread;
use std::time::Duration;

use chrono::Local;
use reqwest::blocking::Client;
use url::Url;

use crate::scraper::extract::{extract_listings, ExtractionSchema};
use crate::scraper::models::{PageExtract, ScrapeOutcome, Termination};
use crate::scraper::ScraperError;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Fixed per-fetch timeout. No retry on failure.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Timestamp format stored on every scraped row.
const SCRAPED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CoinScraper {
    client: Client,
    schema: ExtractionSchema,
    page_delay: Duration,
}

impl CoinScraper {
    pub fn new(schema: ExtractionSchema, page_delay: Duration) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self {
            client,
            schema,
            page_delay,
        })
    }

    /// One network round trip. Timeout, connection failure and
    /// non-success status all surface as errors; the driver decides what
    /// stopping means.
    pub fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScraperError::Status(status.as_u16()));
        }

        let html = resp
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        #[cfg(debug_assertions)]
        {
            let _ = std::fs::write("coinafrique_debug.html", &html);
        }

        Ok(html)
    }

    /// Walk `{base_url}?page=1..=max_pages`, handing each batch to
    /// `on_page` (persistence lives in the callback). Stops early on the
    /// first fetch error or the first page with no card containers; rows
    /// from earlier pages have already been handed over by then.
    pub fn scrape_all_pages<F>(
        &self,
        base_url: &str,
        category: &str,
        max_pages: u32,
        on_page: F,
    ) -> Result<ScrapeOutcome, ScraperError>
    where
        F: FnMut(&PageExtract) -> Result<(), ScraperError>,
    {
        run_paginated(
            |page| {
                let page_url = page_url(base_url, page)?;
                eprintln!("📄 Scraping page {page}/{max_pages}: {page_url}");
                self.fetch_page(&page_url)
            },
            &self.schema,
            category,
            max_pages,
            self.page_delay,
            on_page,
        )
    }
}

/// The sequential paginator: one fetch at a time, fixed courtesy delay
/// between pages. Split from the HTTP client so the state machine can be
/// driven by canned pages in tests.
pub(crate) fn run_paginated<F, G>(
    mut fetch: F,
    schema: &ExtractionSchema,
    category: &str,
    max_pages: u32,
    page_delay: Duration,
    mut on_page: G,
) -> Result<ScrapeOutcome, ScraperError>
where
    F: FnMut(u32) -> Result<String, ScraperError>,
    G: FnMut(&PageExtract) -> Result<(), ScraperError>,
{
    let mut pages_fetched = 0;
    let mut rows = 0;
    let mut skipped = 0;
    let mut termination = Termination::PageLimit;

    for page in 1..=max_pages {
        let html = match fetch(page) {
            Ok(html) => html,
            Err(e) => {
                eprintln!("⚠️ Page {page} failed: {e}");
                termination = Termination::FetchFailed(e.to_string());
                break;
            }
        };

        let scraped_at = Local::now().format(SCRAPED_AT_FORMAT).to_string();
        let extract = extract_listings(&html, schema, category, &scraped_at)?;

        if extract.is_empty_page() {
            eprintln!("🏁 No listings found on page {page}, stopping");
            termination = Termination::Exhausted;
            break;
        }

        for reason in &extract.skipped {
            eprintln!("⚠️ Skipped a container on page {page}: {reason}");
        }
        eprintln!(
            "✅ Page {page} parsed ({} listings, {} skipped)",
            extract.listings.len(),
            extract.skipped.len()
        );

        on_page(&extract)?;

        pages_fetched += 1;
        rows += extract.listings.len();
        skipped += extract.skipped.len();

        if page < max_pages && !page_delay.is_zero() {
            thread::sleep(page_delay);
        }
    }

    Ok(ScrapeOutcome {
        pages_fetched,
        rows,
        skipped,
        termination,
    })
}

/// `{base}?page={n}` — the one URL shape the site paginates with.
fn page_url(base_url: &str, page: u32) -> Result<String, ScraperError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ScraperError::Network(format!("bad base url '{base_url}': {e}")))?;
    url.query_pairs_mut()
        .append_pair("page", &page.to_string());
    Ok(url.into())
}
