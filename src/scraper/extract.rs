use scraper::{ElementRef, Html, Selector};

use crate::scraper::models::{Listing, PageExtract, SkipReason};
use crate::scraper::ScraperError;

/// CSS lookup paths for one site layout. The card structure is owned by
/// the site, so the paths live in data rather than in the extraction
/// logic; a layout change means a new schema, not new code.
#[derive(Debug, Clone)]
pub struct ExtractionSchema {
    pub container: String,
    pub name: String,
    pub price: String,
    pub location: String,
    pub image: String,
}

impl Default for ExtractionSchema {
    /// Card layout used by sn.coinafrique.com category pages.
    fn default() -> Self {
        Self {
            container: "div.col.s6.m4.l3".into(),
            name: "p.ad__card-description".into(),
            price: "p.ad__card-price".into(),
            location: "p.ad__card-location span".into(),
            image: "img.ad__card-img".into(),
        }
    }
}

struct CompiledSchema {
    container: Selector,
    name: Selector,
    price: Selector,
    location: Selector,
    image: Selector,
}

impl ExtractionSchema {
    fn compile(&self) -> Result<CompiledSchema, ScraperError> {
        Ok(CompiledSchema {
            container: parse_selector(&self.container)?,
            name: parse_selector(&self.name)?,
            price: parse_selector(&self.price)?,
            location: parse_selector(&self.location)?,
            image: parse_selector(&self.image)?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css)
        .map_err(|e| ScraperError::HtmlParse(format!("bad selector '{css}': {e}")))
}

/// Pull all card containers out of one page of markup.
///
/// A container missing any field is skipped on its own, with a reason;
/// well-formed siblings from the same page are unaffected.
pub fn extract_listings(
    html: &str,
    schema: &ExtractionSchema,
    category: &str,
    scraped_at: &str,
) -> Result<PageExtract, ScraperError> {
    let compiled = schema.compile()?;
    let document = Html::parse_document(html);

    let mut out = PageExtract::default();
    for container in document.select(&compiled.container) {
        match extract_card(container, &compiled, category, scraped_at) {
            Ok(listing) => out.listings.push(listing),
            Err(reason) => out.skipped.push(reason),
        }
    }
    Ok(out)
}

fn extract_card(
    container: ElementRef,
    schema: &CompiledSchema,
    category: &str,
    scraped_at: &str,
) -> Result<Listing, SkipReason> {
    let name = text_of(container, &schema.name).ok_or(SkipReason::MissingName)?;
    let price_raw = text_of(container, &schema.price).ok_or(SkipReason::MissingPrice)?;
    let address = text_of(container, &schema.location).ok_or(SkipReason::MissingLocation)?;
    let image_url = container
        .select(&schema.image)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string)
        .ok_or(SkipReason::MissingImage)?;

    Ok(Listing {
        name,
        price_text: clean_price_text(&price_raw),
        address,
        image_url,
        category: category.to_string(),
        scraped_at: scraped_at.to_string(),
    })
}

fn text_of(container: ElementRef, selector: &Selector) -> Option<String> {
    let node = container.select(selector).next()?;
    let text = node.text().collect::<Vec<_>>().join(" ").trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Strip currency markers and spacing: "12 500 CFA" -> "12500".
/// Coercion to a number is deferred to the cleaned projection.
pub fn clean_price_text(raw: &str) -> String {
    raw.replace("CFA", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
