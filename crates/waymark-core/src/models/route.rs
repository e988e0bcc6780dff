//! Saved route model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{RouteFeature, RouteProfile, Waypoint};

/// A persisted, named snapshot of a past session.
///
/// `waypoints` and `route_feature` are deep copies taken at save time and are
/// independent of any live session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedRoute {
    /// Unique identifier, assigned at creation
    pub id: String,

    /// User-chosen display name. Not guaranteed unique after renames.
    pub name: String,

    /// Timestamp when the route was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp of the last rename or soft delete (UTC)
    pub updated_at: Timestamp,

    /// Routing mode used, fixed at creation
    pub profile: RouteProfile,

    /// Ordered waypoint snapshot
    pub waypoints: Vec<Waypoint>,

    /// Route geometry snapshot
    pub route_feature: RouteFeature,

    pub distance_meters: Option<u32>,
    pub duration_seconds: Option<u32>,

    /// External identity tag reserved for sync; not used for access control
    pub owner_uid: Option<String>,

    /// Not yet synchronized to a remote store
    pub dirty: bool,

    pub last_synced_at: Option<Timestamp>,

    /// Set when soft-deleted
    pub deleted_at: Option<Timestamp>,
}

/// Input for [`SavedRoute::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoute {
    pub name: String,
    pub profile: RouteProfile,
    pub waypoints: Vec<Waypoint>,
    pub route_feature: RouteFeature,
    pub distance_meters: Option<u32>,
    pub duration_seconds: Option<u32>,
    pub owner_uid: Option<String>,
}

impl SavedRoute {
    /// Builds a fresh, dirty record. Nothing is written until the record is
    /// persisted through a store.
    pub fn create(input: NewRoute) -> Self {
        let now = Timestamp::now();
        Self {
            id: format!("route_{}", Uuid::new_v4().simple()),
            name: input.name,
            created_at: now,
            updated_at: now,
            profile: input.profile,
            waypoints: input.waypoints,
            route_feature: input.route_feature,
            distance_meters: input.distance_meters,
            duration_seconds: input.duration_seconds,
            owner_uid: input.owner_uid,
            dirty: true,
            last_synced_at: None,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl NewRoute {
    /// Snapshot input with the metrics taken from the feature's properties.
    pub fn from_session(
        name: String,
        profile: RouteProfile,
        waypoints: Vec<Waypoint>,
        route_feature: RouteFeature,
    ) -> Self {
        let distance_meters = route_feature.distance_meters().map(round_metric);
        let duration_seconds = route_feature.duration_seconds().map(round_metric);
        Self {
            name,
            profile,
            waypoints,
            route_feature,
            distance_meters,
            duration_seconds,
            owner_uid: None,
        }
    }

    pub fn with_owner(mut self, owner_uid: Option<String>) -> Self {
        self.owner_uid = owner_uid;
        self
    }
}

fn round_metric(value: f64) -> u32 {
    // `as` saturates: negatives become 0, overflow becomes u32::MAX
    value.round() as u32
}
