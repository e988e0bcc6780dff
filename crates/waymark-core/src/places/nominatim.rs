//! Forward and reverse geocoding over the Nominatim API.

use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use super::PlacesConfig;
use crate::{
    error::{Result, WaymarkError},
    models::{PlaceContext, SearchResult},
    params::{PlaceSearch, MIN_SEARCH_QUERY_LEN},
};

#[derive(Deserialize)]
struct ReverseResponse {
    address: Option<PlaceContext>,
}

/// One `/search` match. Coordinates arrive as strings.
#[derive(Deserialize)]
struct SearchMatch {
    #[serde(default)]
    display_name: String,
    lat: String,
    lon: String,
    address: Option<PlaceContext>,
}

impl SearchMatch {
    fn into_result(self) -> Option<SearchResult> {
        let lon = self.lon.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        let lat = self.lat.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        let address = self.address.unwrap_or_default();
        Some(SearchResult {
            display_name: self.display_name,
            lon,
            lat,
            region: search_city(&address),
            country: address.country,
        })
    }
}

/// Settlement label for a search match. Suburbs are skipped here, unlike
/// [`PlaceContext::best_city`].
fn search_city(address: &PlaceContext) -> Option<String> {
    [
        &address.city,
        &address.town,
        &address.village,
        &address.municipality,
        &address.county,
        &address.state,
    ]
    .into_iter()
    .flatten()
    .map(|s| s.trim())
    .find(|s| !s.is_empty())
    .map(String::from)
}

/// Client for Nominatim's `/search` and `/reverse` endpoints.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: &PlacesConfig) -> Result<Self> {
        Ok(Self {
            client: config.http_client()?,
            base_url: config.nominatim_url.trim_end_matches('/').to_string(),
        })
    }

    /// Places matching a free-text query, in the service's ranking order.
    ///
    /// A query shorter than three characters once trimmed returns no results
    /// without a request. Matches with unusable coordinates are dropped.
    pub async fn search(&self, params: &PlaceSearch) -> Result<Vec<SearchResult>> {
        let query = params.query.trim();
        if query.chars().count() < MIN_SEARCH_QUERY_LEN {
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.base_url);
        debug!("Nominatim search for {query:?}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
                ("limit", params.limit.to_string()),
                ("accept-language", "en".to_string()),
                ("q", query.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Nominatim search returned {status}");
            return Err(WaymarkError::lookup_status(
                format!("Search failed ({})", status.as_u16()),
                status.as_u16(),
            ));
        }

        let matches: Vec<SearchMatch> = response.json().await?;
        Ok(matches
            .into_iter()
            .filter_map(SearchMatch::into_result)
            .collect())
    }

    /// Address components around a coordinate.
    ///
    /// A non-success response yields `Ok(None)`; only transport and decoding
    /// failures are errors.
    pub async fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<Option<PlaceContext>> {
        let url = format!("{}/reverse", self.base_url);
        debug!("Nominatim reverse lookup at {lat},{lon}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("addressdetails", "1".to_string()),
                ("accept-language", "en".to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Nominatim returned {}", response.status());
            return Ok(None);
        }

        let data: ReverseResponse = response.json().await?;
        Ok(data.address)
    }
}
