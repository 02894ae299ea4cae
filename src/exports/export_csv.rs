use std::io::{Read, Write};

use crate::domain::listing::{CleanListing, StoredListing};
use crate::errors::AppError;

// serde only emits the header lazily on the first row, so an empty
// table needs it written by hand. Field order must match the structs.
const RAW_HEADER: [&str; 7] = [
    "id",
    "name",
    "price_text",
    "address",
    "image_url",
    "category",
    "scraped_at",
];
const CLEAN_HEADER: [&str; 7] = [
    "id",
    "name",
    "price",
    "address",
    "image_url",
    "category",
    "scraped_at",
];

/// Full raw table, price kept in its original text form. UTF-8, header
/// row included even when the table is empty.
pub fn write_raw_csv<W: Write>(writer: W, rows: &[StoredListing]) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        wtr.write_record(RAW_HEADER)
            .map_err(|e| AppError::CsvError(e.to_string()))?;
    }
    for row in rows {
        wtr.serialize(row)
            .map_err(|e| AppError::CsvError(e.to_string()))?;
    }
    wtr.flush().map_err(|e| AppError::IoError(e.to_string()))
}

/// Cleaned view: numeric prices, rejected rows already excluded.
pub fn write_clean_csv<W: Write>(writer: W, rows: &[CleanListing]) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        wtr.write_record(CLEAN_HEADER)
            .map_err(|e| AppError::CsvError(e.to_string()))?;
    }
    for row in rows {
        wtr.serialize(row)
            .map_err(|e| AppError::CsvError(e.to_string()))?;
    }
    wtr.flush().map_err(|e| AppError::IoError(e.to_string()))
}

/// Re-parse a cleaned export, e.g. a pre-scraped dataset shipped as CSV.
pub fn read_clean_csv<R: Read>(reader: R) -> Result<Vec<CleanListing>, AppError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut out = Vec::new();
    for result in rdr.deserialize() {
        out.push(result.map_err(|e| AppError::CsvError(e.to_string()))?);
    }
    Ok(out)
}
