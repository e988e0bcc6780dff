//! Road-snapping and path-geometry lookups.
//!
//! [`GeoLookup`] is the request/response contract the waypoint session
//! depends on. [`OsrmClient`] implements it against an OSRM HTTP server.
//! Each call is a single attempt: no caching, retry, or backoff.

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{LonLat, RouteFeature},
};

pub mod osrm;

pub use osrm::{OsrmClient, OsrmConfig};

/// External routing service contract.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Snaps a raw coordinate to the nearest point on the road network.
    ///
    /// Fails with a lookup error when the service is unreachable, answers
    /// with a non-success status, or returns no candidate.
    async fn snap_to_road(&self, point: LonLat) -> Result<LonLat>;

    /// Computes the path through `points` in order.
    ///
    /// Returns `Ok(None)` without contacting the service when fewer than two
    /// points are given. The returned coordinates keep the service's order.
    async fn build_route(&self, points: &[LonLat]) -> Result<Option<RouteFeature>>;
}
