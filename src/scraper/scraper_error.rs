use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ScraperError {
    Network(String),
    Status(u16),
    HtmlParse(String),
    Store(String),
}

impl fmt::Display for ScraperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScraperError::Network(msg) => write!(f, "Network error: {msg}"),
            ScraperError::Status(code) => write!(f, "Unexpected HTTP status: {code}"),
            ScraperError::HtmlParse(msg) => write!(f, "HTML parse error: {msg}"),
            ScraperError::Store(msg) => write!(f, "Store error: {msg}"),
        }
    }
}

impl Error for ScraperError {}
