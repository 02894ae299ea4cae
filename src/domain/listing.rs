use serde::{Deserialize, Serialize};

/// A raw row as read back from the store, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredListing {
    pub id: i64,
    pub name: String,
    pub price_text: String,
    pub address: String,
    pub image_url: String,
    pub category: String,
    pub scraped_at: String,
}

/// Read-only projection of a stored row with a coerced price. Derived
/// on demand from the raw table, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanListing {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub address: String,
    pub image_url: String,
    pub category: String,
    pub scraped_at: String,
}

/// Coerce a stored price text to a number. Rejects anything that fails
/// to parse, is not finite, or is not strictly positive.
pub fn normalize_price(price_text: &str) -> Option<f64> {
    let price: f64 = price_text.trim().parse().ok()?;
    if price.is_finite() && price > 0.0 {
        Some(price)
    } else {
        None
    }
}

/// Cleaned view over the full raw set. Rows failing coercion drop out
/// of the view; the raw rows stay in storage untouched.
pub fn clean_listings(rows: &[StoredListing]) -> Vec<CleanListing> {
    rows.iter()
        .filter_map(|row| {
            let price = normalize_price(&row.price_text)?;
            Some(CleanListing {
                id: row.id,
                name: row.name.clone(),
                price,
                address: row.address.clone(),
                image_url: row.image_url.clone(),
                category: row.category.clone(),
                scraped_at: row.scraped_at.clone(),
            })
        })
        .collect()
}
