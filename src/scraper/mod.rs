mod extract;
mod models;
mod scraper;
mod scraper_error;

pub use extract::{clean_price_text, extract_listings, ExtractionSchema};
pub use models::{Listing, PageExtract, ScrapeOutcome, SkipReason, Termination};
pub use scraper::CoinScraper;
pub(crate) use scraper::run_paginated;
pub use scraper_error::ScraperError;
