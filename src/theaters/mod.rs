//! Theater lookup subsystem.
//!
//! Scrapes the AlloCiné directory department by department, geocodes each
//! theater's address, caches the result on disk and filters by distance.

pub mod cache;
pub mod department;
pub mod directory;
pub mod finder;
pub mod geocoder;
pub mod types;

pub use cache::TheaterCache;
pub use finder::{filter_within, TheaterFinder};
pub use types::{GeoPoint, RawTheaterRecord, Theater};
