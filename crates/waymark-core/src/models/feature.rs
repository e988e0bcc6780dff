//! Route geometry as a GeoJSON `Feature` with a `LineString` geometry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `[lon, lat]`, GeoJSON coordinate order.
pub type Position = [f64; 2];

/// Property key holding the route length in meters, when the service reports it.
pub const DISTANCE_PROPERTY: &str = "distance";
/// Property key holding the travel time in seconds, when the service reports it.
pub const DURATION_PROPERTY: &str = "duration";

/// The `type` tag of a feature. Only `"Feature"` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureType {
    #[default]
    Feature,
}

/// The `type` tag of a geometry. Only `"LineString"` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStringType {
    #[default]
    LineString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub kind: LineStringType,
    pub coordinates: Vec<Position>,
}

/// A single contiguous path connecting the waypoints in order.
///
/// The coordinate sequence is whatever the routing service returned, so it
/// includes the intermediate road-following points and is not one-to-one with
/// the waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFeature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub geometry: LineString,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Axis-aligned bounding box of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl RouteFeature {
    pub fn new(coordinates: Vec<Position>) -> Self {
        Self {
            kind: FeatureType::Feature,
            geometry: LineString {
                kind: LineStringType::LineString,
                coordinates,
            },
            properties: Map::new(),
        }
    }

    /// Records the service-reported length and travel time, skipping absent
    /// or non-finite values.
    pub fn with_metrics(mut self, distance: Option<f64>, duration: Option<f64>) -> Self {
        for (key, value) in [(DISTANCE_PROPERTY, distance), (DURATION_PROPERTY, duration)] {
            if let Some(number) = value.and_then(serde_json::Number::from_f64) {
                self.properties.insert(key.to_string(), Value::Number(number));
            }
        }
        self
    }

    pub fn coordinates(&self) -> &[Position] {
        &self.geometry.coordinates
    }

    pub fn len(&self) -> usize {
        self.geometry.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.coordinates.is_empty()
    }

    pub fn distance_meters(&self) -> Option<f64> {
        self.properties.get(DISTANCE_PROPERTY).and_then(Value::as_f64)
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.properties.get(DURATION_PROPERTY).and_then(Value::as_f64)
    }

    /// Bounding box of the path, `None` for an empty geometry.
    pub fn bounds(&self) -> Option<Bounds> {
        let (first, rest) = self.geometry.coordinates.split_first()?;
        let init = Bounds {
            min_lon: first[0],
            min_lat: first[1],
            max_lon: first[0],
            max_lat: first[1],
        };
        Some(rest.iter().fold(init, |b, [lon, lat]| Bounds {
            min_lon: b.min_lon.min(*lon),
            min_lat: b.min_lat.min(*lat),
            max_lon: b.max_lon.max(*lon),
            max_lat: b.max_lat.max(*lat),
        }))
    }
}
