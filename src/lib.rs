//! Find movie theaters near a point.
//!
//! The full theater list is scraped from AlloCiné once, geocoded through
//! api-adresse.data.gouv.fr, and cached at `~/.cache/showtimes/theaters.json`.
//! Every later lookup reads the cache and filters by great-circle distance.

pub mod config;
pub mod error;
pub mod geo;
pub mod http;
pub mod theaters;

pub use config::{Endpoints, FinderConfig};
pub use error::TheaterError;
pub use http::{HttpClient, UreqClient};
pub use theaters::{Theater, TheaterCache, TheaterFinder};

/// Theaters strictly closer than `distance_in_meters` to a point, using the
/// default cache location and endpoints.
pub fn get_theaters_within(
    latitude: f64,
    longitude: f64,
    distance_in_meters: f64,
) -> Result<Vec<Theater>, TheaterError> {
    TheaterFinder::new(FinderConfig::default()).find_theaters_within(latitude, longitude, distance_in_meters)
}
