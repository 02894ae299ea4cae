// errors.rs
use std::fmt;

/// Errors originating from the CLI surface or downstream layers
/// (DB, CSV export, filesystem, scrape pipeline).
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    DbError(String),
    CsvError(String),
    IoError(String),
    ScrapeError(String),
    InternalError,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            AppError::DbError(msg) => write!(f, "Database error: {msg}"),
            AppError::CsvError(msg) => write!(f, "CSV error: {msg}"),
            AppError::IoError(msg) => write!(f, "IO error: {msg}"),
            AppError::ScrapeError(msg) => write!(f, "Scrape error: {msg}"),
            AppError::InternalError => write!(f, "Internal error"),
        }
    }
}

impl std::error::Error for AppError {}
