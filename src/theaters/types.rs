//! Core types for theater lookup.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A movie theater with a resolved position.
///
/// This is also the on-disk cache format: `{id, name, latitude, longitude}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theater {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Theater {
    pub fn new(id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Distance in meters from this theater to a point.
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        crate::geo::distance_meters(latitude, longitude, self.latitude, self.longitude)
    }
}

/// A coordinate pair as returned by the geocoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    /// Build from a GeoJSON `[longitude, latitude]` array.
    pub fn from_lon_lat(coords: &[Value]) -> Option<Self> {
        match coords {
            [lon, lat, ..] => Some(Self {
                longitude: lon.as_f64()?,
                latitude: lat.as_f64()?,
            }),
            _ => None,
        }
    }
}

/// One theater card lifted from a department listing page, before geocoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTheaterRecord {
    pub id: String,
    pub name: String,
    pub address: String,
}

impl RawTheaterRecord {
    pub fn into_theater(self, at: GeoPoint) -> Theater {
        Theater {
            id: self.id,
            name: self.name,
            latitude: at.latitude,
            longitude: at.longitude,
        }
    }
}

/// Render a JSON id as a string if it is truthy.
///
/// Accepts non-empty strings, non-zero numbers and `true`; everything else
/// (missing, `null`, `""`, `0`, `false`, arrays, objects) is rejected.
pub(crate) fn truthy_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
