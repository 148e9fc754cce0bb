//! Finder configuration: cache location, remote endpoints, HTTP agent settings.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SITE_ROOT: &str = "https://www.allocine.fr";
pub const DEFAULT_GEOCODER: &str = "https://api-adresse.data.gouv.fr/search/";

/// Remote services the scraper talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Theater directory host, without trailing slash.
    pub site_root: String,
    /// Address search endpoint; the query is appended as `?q=`.
    pub geocoder: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            site_root: DEFAULT_SITE_ROOT.to_string(),
            geocoder: DEFAULT_GEOCODER.to_string(),
        }
    }
}

impl Endpoints {
    /// Top-level page listing every department.
    pub fn directory_url(&self) -> String {
        format!("{}/salle/", self.site_root)
    }

    /// One listing page of a department. Pages are 1-indexed.
    pub fn department_url(&self, code: &str, page: u32) -> String {
        format!("{}/salle/cinema/departement-{}/?page={}", self.site_root, code, page)
    }
}

/// Everything a [`TheaterFinder`](crate::TheaterFinder) needs to know about its environment.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Directory holding `theaters.json`.
    pub cache_dir: PathBuf,
    pub endpoints: Endpoints,
    pub user_agent: String,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            cache_dir: Self::default_cache_dir(),
            endpoints: Endpoints::default(),
            user_agent: format!("showtimes/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
        }
    }
}

impl FinderConfig {
    /// Use a specific cache directory (for testing).
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `~/.cache/showtimes`
    fn default_cache_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cache")
            .join("showtimes")
    }
}
