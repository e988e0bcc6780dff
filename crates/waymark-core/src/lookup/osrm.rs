//! OSRM HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response};
use serde::Deserialize;

use super::GeoLookup;
use crate::{
    error::{Result, WaymarkError},
    models::{LonLat, Position, RouteFeature, RouteProfile},
};

pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_USER_AGENT: &str = concat!("waymark/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct NearestResponse {
    #[serde(default)]
    waypoints: Vec<NearestWaypoint>,
}

#[derive(Deserialize)]
struct NearestWaypoint {
    location: Option<Vec<f64>>,
}

#[derive(Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    geometry: Option<OsrmGeometry>,
    distance: Option<f64>,
    duration: Option<f64>,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    #[serde(default)]
    coordinates: Vec<Position>,
}

/// Connection settings for [`OsrmClient`].
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    base_url: String,
    profile: RouteProfile,
    timeout: Duration,
    user_agent: String,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OSRM_URL.to_string(),
            profile: RouteProfile::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl OsrmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Server root, without the `/route/v1` suffix. A trailing slash is
    /// ignored.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_profile(mut self, profile: RouteProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn profile(&self) -> RouteProfile {
        self.profile
    }
}

/// [`GeoLookup`] backed by the OSRM `nearest` and `route` services.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| WaymarkError::Configuration {
                message: format!("Failed to build OSRM HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    fn nearest_url(&self, point: LonLat) -> String {
        format!(
            "{}/nearest/v1/{}/{},{}",
            self.config.base_url,
            self.config.profile.as_str(),
            point.lon,
            point.lat
        )
    }

    fn route_url(&self, points: &[LonLat]) -> String {
        let coords = points
            .iter()
            .map(|p| format!("{},{}", p.lon, p.lat))
            .collect::<Vec<_>>()
            .join(";");
        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson",
            self.config.base_url,
            self.config.profile.as_str(),
            coords
        )
    }

    async fn get(&self, url: &str, service: &str) -> Result<Response> {
        debug!("OSRM {service} request: {url}");
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("OSRM {service} unreachable: {e}");
            WaymarkError::lookup(format!("OSRM {service} request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("OSRM {service} returned {status}");
            return Err(WaymarkError::lookup_status(
                format!("OSRM {service} failed ({})", status.as_u16()),
                status.as_u16(),
            ));
        }

        Ok(response)
    }
}

#[async_trait]
impl GeoLookup for OsrmClient {
    async fn snap_to_road(&self, point: LonLat) -> Result<LonLat> {
        let url = self.nearest_url(point);
        let data: NearestResponse = self.get(&url, "nearest").await?.json().await?;

        match data.waypoints.into_iter().next().and_then(|w| w.location) {
            Some(location) if location.len() == 2 => Ok(LonLat::new(location[0], location[1])),
            _ => Err(WaymarkError::lookup("OSRM nearest: no waypoint found")),
        }
    }

    async fn build_route(&self, points: &[LonLat]) -> Result<Option<RouteFeature>> {
        if points.len() < 2 {
            return Ok(None);
        }

        let url = self.route_url(points);
        let data: RouteResponse = self.get(&url, "route").await?.json().await?;

        let Some(route) = data.routes.into_iter().next() else {
            return Err(WaymarkError::lookup("OSRM route: no geometry returned"));
        };
        let coordinates = route
            .geometry
            .map(|g| g.coordinates)
            .unwrap_or_default();
        if coordinates.is_empty() {
            return Err(WaymarkError::lookup("OSRM route: no geometry returned"));
        }

        debug!("OSRM route returned {} coordinates", coordinates.len());
        Ok(Some(
            RouteFeature::new(coordinates).with_metrics(route.distance, route.duration),
        ))
    }
}
