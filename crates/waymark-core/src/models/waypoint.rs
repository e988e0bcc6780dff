//! Coordinates and road-snapped waypoints.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Position;

/// A longitude/latitude pair in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether both components lie within the valid WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<LonLat> for Position {
    fn from(p: LonLat) -> Self {
        [p.lon, p.lat]
    }
}

impl From<Position> for LonLat {
    fn from(p: Position) -> Self {
        Self { lon: p[0], lat: p[1] }
    }
}

/// Parses `"lon,lat"`, the order routing services use on the wire.
impl FromStr for LonLat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lon, lat) = s
            .split_once(',')
            .ok_or_else(|| format!("Expected 'lon,lat', got '{s}'"))?;
        let lon = lon
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid longitude '{lon}': {e}"))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid latitude '{lat}': {e}"))?;
        let point = Self { lon, lat };
        if !point.is_valid() {
            return Err(format!("Coordinate out of range: {lon},{lat}"));
        }
        Ok(point)
    }
}

/// A stop on the working route.
///
/// The coordinate is the road-snapped position, not the raw tap. Waypoints are
/// never edited in place; reorders and removals replace the session's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Opaque identifier, stable across reorders
    pub id: String,
    pub lon: f64,
    pub lat: f64,
    /// Region label attached when the waypoint came from a search result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Country label attached when the waypoint came from a search result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Waypoint {
    /// Creates an unlabeled waypoint with a fresh id.
    pub fn new(position: LonLat) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            lon: position.lon,
            lat: position.lat,
            region: None,
            country: None,
        }
    }

    pub fn with_labels(mut self, region: Option<String>, country: Option<String>) -> Self {
        self.region = region;
        self.country = country;
        self
    }

    pub fn position(&self) -> LonLat {
        LonLat::new(self.lon, self.lat)
    }
}
