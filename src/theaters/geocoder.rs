//! Address geocoding through the api-adresse.data.gouv.fr search endpoint.

use super::types::GeoPoint;
use crate::config::Endpoints;
use crate::error::TheaterError;
use crate::http::HttpClient;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<Value>,
}

/// Resolve a free-text postal address to the first matching point.
///
/// No match, or a response we can't make sense of, yields `Ok(None)` with a
/// warning. Only a transport failure is an error.
pub fn geocode(
    client: &dyn HttpClient,
    endpoints: &Endpoints,
    address: &str,
) -> Result<Option<GeoPoint>, TheaterError> {
    let url = format!("{}?q={}", endpoints.geocoder, encode_uri_component(address));
    let body = client.get_text(&url)?;

    let point = serde_json::from_str::<SearchResponse>(&body)
        .ok()
        .and_then(|r| r.features.into_iter().next())
        .and_then(|f| GeoPoint::from_lon_lat(&f.geometry.coordinates));

    if point.is_none() {
        tracing::warn!(address, "No coordinates found");
    }
    Ok(point)
}

/// Percent-encode a query value the way `encodeURIComponent` does.
fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
