//! Points-of-interest search and reverse geocoding.
//!
//! Both services are external collaborators consumed through their HTTP
//! request/response contracts, like the routing service in
//! [`crate::lookup`].

use std::time::Duration;

use reqwest::Client;

use crate::error::{Result, WaymarkError};

pub mod nominatim;
pub mod overpass;
pub mod tags;

pub use nominatim::NominatimClient;
pub use overpass::OverpassClient;
pub use tags::{describe_place_type, format_address, pick_useful_info};

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Endpoints and HTTP settings shared by the places clients.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub overpass_url: String,
    pub nominatim_url: String,
    pub timeout: Duration,
    /// Nominatim's usage policy requires an identifying user agent
    pub user_agent: String,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            // Overpass queries carry a 25 s server-side timeout
            timeout: Duration::from_secs(30),
            user_agent: concat!("waymark/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl PlacesConfig {
    fn http_client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()
            .map_err(|e| WaymarkError::Configuration {
                message: format!("Failed to build places HTTP client: {e}"),
            })
    }
}
