use crate::db::connection::Database;
use crate::domain::listing::StoredListing;
use crate::errors::AppError;
use crate::scraper::Listing;
use rusqlite::params;

/// Snapshot of the last saved batch, for poking at extraction output
/// while developing against a live page.
#[cfg(debug_assertions)]
pub fn save_listings_debug(listings: &[Listing], filename: &str) -> std::io::Result<()> {
    use std::fs::File;
    use std::io::BufWriter;

    let file = File::create(filename)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, listings)?;
    Ok(())
}

/// Append one batch to the end of the table, in arrival order, inside a
/// single transaction. Plain INSERTs only: rows are never updated or
/// deduplicated against earlier scrapes.
pub fn save_listings(db: &Database, listings: &[Listing]) -> Result<(), AppError> {
    if listings.is_empty() {
        return Ok(());
    }

    #[cfg(debug_assertions)]
    {
        let _ = save_listings_debug(listings, "listings_debug.json");
    }

    db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| AppError::DbError(e.to_string()))?;

        for listing in listings {
            tx.execute(
                r#"
                INSERT INTO scraped_listings
                    (name, price_text, address, image_url, category, scraped_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    listing.name,
                    listing.price_text,
                    listing.address,
                    listing.image_url,
                    listing.category,
                    listing.scraped_at,
                ],
            )
            .map_err(|e| AppError::DbError(e.to_string()))?;
        }

        tx.commit().map_err(|e| AppError::DbError(e.to_string()))
    })
}

/// Full-table read-back, unfiltered, in insertion order.
pub fn load_all(db: &Database) -> Result<Vec<StoredListing>, AppError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT id, name, price_text, address, image_url, category, scraped_at
                FROM scraped_listings
                ORDER BY id
                "#,
            )
            .map_err(|e| AppError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(StoredListing {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    price_text: row.get(2)?,
                    address: row.get(3)?,
                    image_url: row.get(4)?,
                    category: row.get(5)?,
                    scraped_at: row.get(6)?,
                })
            })
            .map_err(|e| AppError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| AppError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}
