//! Points of interest and reverse-geocoding context.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Category groups offered by the explore-nearby search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExploreCategory {
    Sights,
    Hotels,
    Nature,
    Cafes,
    Restaurants,
}

impl ExploreCategory {
    pub const ALL: [ExploreCategory; 5] = [
        ExploreCategory::Sights,
        ExploreCategory::Hotels,
        ExploreCategory::Nature,
        ExploreCategory::Cafes,
        ExploreCategory::Restaurants,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExploreCategory::Sights => "sights",
            ExploreCategory::Hotels => "hotels",
            ExploreCategory::Nature => "nature",
            ExploreCategory::Cafes => "cafes",
            ExploreCategory::Restaurants => "restaurants",
        }
    }
}

impl FromStr for ExploreCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sights" => Ok(ExploreCategory::Sights),
            "hotels" => Ok(ExploreCategory::Hotels),
            "nature" => Ok(ExploreCategory::Nature),
            "cafes" => Ok(ExploreCategory::Cafes),
            "restaurants" => Ok(ExploreCategory::Restaurants),
            _ => Err(format!("Invalid explore category: {s}")),
        }
    }
}

impl fmt::Display for ExploreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named OpenStreetMap feature found by the explore search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorePlace {
    /// `"<element type>/<osm id>"`, e.g. `"node/42"`
    pub id: String,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    pub category: ExploreCategory,
    pub tags: BTreeMap<String, String>,
    /// Great-circle distance from the search center
    pub distance_meters: Option<f64>,
}

/// Address components returned by reverse geocoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceContext {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub suburb: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub postcode: Option<String>,
    pub road: Option<String>,
    pub house_number: Option<String>,
}

impl PlaceContext {
    /// The most specific settlement name available, or `None` when every
    /// candidate is missing or blank.
    pub fn best_city(&self) -> Option<String> {
        [
            &self.city,
            &self.town,
            &self.village,
            &self.municipality,
            &self.suburb,
            &self.county,
            &self.state,
        ]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(String::from)
    }
}

/// A place found by forward geocoding, labeled the way a waypoint added
/// from it will be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub display_name: String,
    pub lon: f64,
    pub lat: f64,
    pub region: Option<String>,
    pub country: Option<String>,
}

/// Human-readable kind of a place, and the tag it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceType {
    pub label: String,
    /// Empty when no tag matched
    pub source_key: String,
}

/// Contact details pulled from a place's tags. Missing values are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsefulInfo {
    pub website: String,
    pub phone: String,
    pub opening_hours: String,
    pub cuisine: String,
}
