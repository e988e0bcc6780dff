//! Explore-nearby search over the Overpass API.

use std::collections::HashMap;

use geo::{Distance, Haversine, Point};
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use super::{
    tags::{self, Tags},
    PlacesConfig,
};
use crate::{
    error::{Result, WaymarkError},
    models::{ExploreCategory, ExplorePlace, LonLat},
    params::NearbySearch,
};

#[derive(Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    id: i64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: Tags,
}

#[derive(Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassElement {
    /// Node coordinates, or the computed center of a way or relation.
    fn position(&self) -> Option<LonLat> {
        match (self.lon, self.lat, &self.center) {
            (Some(lon), Some(lat), _) => Some(LonLat::new(lon, lat)),
            (_, _, Some(c)) => Some(LonLat::new(c.lon, c.lat)),
            _ => None,
        }
    }
}

/// Client for the Overpass interpreter endpoint.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    url: String,
}

impl OverpassClient {
    pub fn new(config: &PlacesConfig) -> Result<Self> {
        Ok(Self {
            client: config.http_client()?,
            url: config.overpass_url.clone(),
        })
    }

    /// Named places of the requested categories around a center, nearest
    /// first. Returns an empty list without a request when no category is
    /// asked for.
    pub async fn search_nearby(&self, search: &NearbySearch) -> Result<Vec<ExplorePlace>> {
        if search.categories.is_empty() {
            return Ok(Vec::new());
        }

        let query = build_query(search);
        debug!("Overpass query:\n{query}");

        let response = self
            .client
            .post(&self.url)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| WaymarkError::lookup(format!("Overpass request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            warn!("Overpass returned {status}");
            return Err(WaymarkError::lookup_status(
                format!("Overpass error {}: {snippet}", status.as_u16()),
                status.as_u16(),
            ));
        }

        let data: OverpassResponse = response.json().await?;
        let places = collect_places(data.elements, search);
        debug!("Overpass search found {} places", places.len());
        Ok(places)
    }
}

fn build_query(search: &NearbySearch) -> String {
    let around = format!(
        "(around:{},{},{})",
        search.radius_meters.round(),
        search.center.lat,
        search.center.lon
    );
    let blocks: String = search
        .categories
        .iter()
        .flat_map(|c| tags::category_filters(*c))
        .map(|(k, v)| format!("  nwr[\"{k}\"=\"{v}\"]{around};\n"))
        .collect();

    format!(
        "[out:json][timeout:25];\n(\n{blocks});\nout tags center {};",
        search.limit
    )
}

fn collect_places(elements: Vec<OverpassElement>, search: &NearbySearch) -> Vec<ExplorePlace> {
    let center = Point::new(search.center.lon, search.center.lat);
    let mut places: Vec<ExplorePlace> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for element in elements {
        let Some(position) = element.position() else {
            continue;
        };
        let Some(name) = tags::best_name(&element.tags) else {
            continue;
        };

        let category = tags::infer_category(&element.tags);
        if !search.categories.contains(&category) {
            continue;
        }
        if category == ExploreCategory::Sights && !tags::is_explicit_sight(&element.tags) {
            continue;
        }

        let distance_meters = search
            .with_distance
            .then(|| Haversine::distance(center, Point::new(position.lon, position.lat)));

        let place = ExplorePlace {
            id: format!("{}/{}", element.kind, element.id),
            name,
            lon: position.lon,
            lat: position.lat,
            category,
            tags: element.tags,
            distance_meters,
        };

        // Later duplicates replace earlier ones in place
        match seen.get(&place.id) {
            Some(&index) => places[index] = place,
            None => {
                seen.insert(place.id.clone(), places.len());
                places.push(place);
            }
        }
    }

    places.sort_by(|a, b| {
        a.distance_meters
            .unwrap_or(0.0)
            .total_cmp(&b.distance_meters.unwrap_or(0.0))
    });
    places
}
