use std::collections::HashMap;

use crate::domain::listing::CleanListing;

/// Price summary over the cleaned view: the metrics the original
/// dashboard displayed.
#[derive(Debug, PartialEq)]
pub struct PriceSummary {
    pub listings: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

pub fn price_summary(rows: &[CleanListing]) -> Option<PriceSummary> {
    if rows.is_empty() {
        return None;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for row in rows {
        min = min.min(row.price);
        max = max.max(row.price);
        sum += row.price;
    }

    Some(PriceSummary {
        listings: rows.len(),
        average: sum / rows.len() as f64,
        min,
        max,
    })
}

/// Listing counts per category, most common first.
pub fn count_by_category(rows: &[CleanListing]) -> Vec<(String, usize)> {
    counted(rows.iter().map(|r| r.category.as_str()))
}

/// Cities with the most listings, most common first, capped at `limit`.
pub fn top_addresses(rows: &[CleanListing], limit: usize) -> Vec<(String, usize)> {
    let mut out = counted(rows.iter().map(|r| r.address.as_str()));
    out.truncate(limit);
    out
}

fn counted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }

    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    // Ties break alphabetically so output is stable.
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}
