//! Theater finder: cached directory plus a radius filter.

use super::cache::TheaterCache;
use super::directory;
use super::types::Theater;
use crate::config::FinderConfig;
use crate::error::TheaterError;
use crate::http::{HttpClient, UreqClient};

/// Finds theaters near a point.
pub struct TheaterFinder<C: HttpClient = UreqClient> {
    client: C,
    config: FinderConfig,
    cache: TheaterCache,
}

impl TheaterFinder<UreqClient> {
    pub fn new(config: FinderConfig) -> Self {
        let client = UreqClient::new(&config);
        Self::with_client(config, client)
    }
}

impl<C: HttpClient> TheaterFinder<C> {
    /// Create a finder with a specific HTTP client (for testing).
    pub fn with_client(config: FinderConfig, client: C) -> Self {
        let cache = TheaterCache::in_dir(&config.cache_dir);
        Self { client, config, cache }
    }

    pub fn cache(&self) -> &TheaterCache {
        &self.cache
    }

    /// Every known theater, scraping the whole directory if nothing is cached.
    pub fn load_theaters(&self) -> Result<Vec<Theater>, TheaterError> {
        self.cache
            .load_or_rebuild(|| directory::scrape_all_theaters(&self.client, &self.config.endpoints))
    }

    /// Theaters strictly closer than `radius_meters` to the given point.
    pub fn find_theaters_within(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> Result<Vec<Theater>, TheaterError> {
        let theaters = self.load_theaters()?;
        Ok(filter_within(theaters, latitude, longitude, radius_meters))
    }
}

/// Keep theaters strictly closer than `radius_meters`, in their original order.
pub fn filter_within(
    theaters: Vec<Theater>,
    latitude: f64,
    longitude: f64,
    radius_meters: f64,
) -> Vec<Theater> {
    theaters
        .into_iter()
        .filter(|t| t.distance_to(latitude, longitude) < radius_meters)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::EARTH_RADIUS_M;
    use crate::http::mock::MockClient;
    use crate::theaters::department::tests::{card, endpoints, geo_body, listing};
    use std::f64::consts::PI;
    use tempfile::TempDir;

    const LAT: f64 = 48.8566;
    const LON: f64 = 2.3522;

    /// A theater `meters` due north of the query point.
    fn north_of_query(id: &str, meters: f64) -> Theater {
        let dlat = meters / EARTH_RADIUS_M * 180.0 / PI;
        Theater::new(id, id, LAT + dlat, LON)
    }

    #[test]
    fn test_filter_within_radius() {
        let theaters = vec![
            north_of_query("far", 1500.0),
            north_of_query("here", 0.0),
            north_of_query("near", 500.0),
        ];
        let found = filter_within(theaters, LAT, LON, 1000.0);
        let ids: Vec<&str> = found.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["here", "near"]);
    }

    #[test]
    fn test_filter_is_strict() {
        let found = filter_within(vec![north_of_query("edge", 1000.0)], LAT, LON, 1000.0 - 1e-3);
        assert!(found.is_empty());
        assert!(filter_within(vec![north_of_query("x", 0.0)], LAT, LON, 0.0).is_empty());
    }

    fn mock_site() -> MockClient {
        let e = endpoints();
        MockClient::new()
            .route(e.directory_url(), r#"<a href="/salle/cinema/departement-75/">Paris</a>"#)
            .route(
                e.department_url("75", 1),
                listing(&[
                    card(r#"{"id":"C0013","name":"Le Grand Rex"}"#, Some("1 Bd Poissonniere")),
                    card(r#"{"id":"W7502","name":"Pathé Boulogne"}"#, Some("26 Rue Le Corbusier")),
                ]),
            )
            .route(e.department_url("75", 2), listing(&[]))
            .route("http://geo.test/search/?q=1%20Bd%20Poissonniere", geo_body(2.3477, 48.8706))
            .route("http://geo.test/search/?q=26%20Rue%20Le%20Corbusier", geo_body(2.2399, 48.8331))
    }

    #[test]
    fn test_find_builds_cache_then_reuses_it() {
        let dir = TempDir::new().unwrap();
        let client = mock_site();
        let config = FinderConfig::default()
            .with_cache_dir(dir.path())
            .with_endpoints(endpoints());
        let finder = TheaterFinder::with_client(config, &client);

        let near = finder.find_theaters_within(LAT, LON, 3_000.0).unwrap();
        assert_eq!(near, vec![Theater::new("C0013", "Le Grand Rex", 48.8706, 2.3477)]);
        let calls_after_build = client.call_count();
        assert_eq!(calls_after_build, 5);
        assert!(finder.cache().exists());

        let all = finder.find_theaters_within(LAT, LON, 20_000.0).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(client.call_count(), calls_after_build);
    }

    #[test]
    fn test_find_rebuild_failure_leaves_no_cache() {
        let dir = TempDir::new().unwrap();
        let client = MockClient::new();
        let config = FinderConfig::default()
            .with_cache_dir(dir.path())
            .with_endpoints(endpoints());
        let finder = TheaterFinder::with_client(config, &client);

        assert!(finder.find_theaters_within(LAT, LON, 1_000.0).is_err());
        assert!(!finder.cache().exists());
    }
}
