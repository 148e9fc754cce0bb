//! Error types for theater lookup.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scraping, geocoding or caching theaters.
#[derive(Debug, Error)]
pub enum TheaterError {
    /// The request never produced a readable response.
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// A theater card's `data-theater` attribute is not valid JSON.
    #[error("Invalid theater metadata: {0}")]
    TheaterJson(#[source] serde_json::Error),

    /// A theater card is missing a required element.
    #[error("Malformed theater card: {0}")]
    MalformedCard(String),

    #[error("Invalid CSS selector '{0}'")]
    Selector(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Reading, writing or creating the cache failed.
    #[error("Cache I/O error at {}: {source}", path.display())]
    CacheIo { path: PathBuf, source: io::Error },

    /// The cache file exists but does not hold a theater list.
    #[error("Corrupt theater cache at {}: {source}", path.display())]
    CacheFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}
