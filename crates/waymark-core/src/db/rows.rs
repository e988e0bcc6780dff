//! Conversion between `routes` table rows and [`SavedRoute`].
//!
//! Rows are first read into [`RouteRow`], which mirrors the column types
//! exactly, and then decoded. Decoding is strict: a malformed JSON blob,
//! timestamp, profile or metric yields [`WaymarkError::CorruptRecord`] naming
//! the offending column instead of a half-filled route.

use jiff::Timestamp;
use rusqlite::Row;

use crate::{
    error::{Result, WaymarkError},
    models::{RouteFeature, RouteProfile, SavedRoute, Waypoint},
};

pub(super) const ROUTE_COLUMNS: &str = "id, name, createdAt, updatedAt, profile, waypointsJson, \
     routeGeoJson, distanceMeters, durationSeconds, ownerUid, dirty, lastSyncedAt, deletedAt";

/// One `routes` row with its raw column values.
pub(super) struct RouteRow {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    pub profile: String,
    pub waypoints_json: String,
    pub route_geojson: String,
    pub distance_meters: Option<i64>,
    pub duration_seconds: Option<i64>,
    pub owner_uid: Option<String>,
    pub dirty: i64,
    pub last_synced_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl RouteRow {
    /// Reads a row selected with [`ROUTE_COLUMNS`].
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: row.get(2)?,
            updated_at: row.get(3)?,
            profile: row.get(4)?,
            waypoints_json: row.get(5)?,
            route_geojson: row.get(6)?,
            distance_meters: row.get(7)?,
            duration_seconds: row.get(8)?,
            owner_uid: row.get(9)?,
            dirty: row.get(10)?,
            last_synced_at: row.get(11)?,
            deleted_at: row.get(12)?,
        })
    }

    /// Serializes a route into column values.
    pub fn encode(route: &SavedRoute) -> Result<Self> {
        Ok(Self {
            id: route.id.clone(),
            name: route.name.clone(),
            created_at: route.created_at.to_string(),
            updated_at: route.updated_at.to_string(),
            profile: route.profile.as_str().to_string(),
            waypoints_json: serde_json::to_string(&route.waypoints)?,
            route_geojson: serde_json::to_string(&route.route_feature)?,
            distance_meters: route.distance_meters.map(i64::from),
            duration_seconds: route.duration_seconds.map(i64::from),
            owner_uid: route.owner_uid.clone(),
            dirty: i64::from(route.dirty),
            last_synced_at: route.last_synced_at.map(|t| t.to_string()),
            deleted_at: route.deleted_at.map(|t| t.to_string()),
        })
    }

    pub fn decode(self) -> Result<SavedRoute> {
        let id = self.id;

        let waypoints: Vec<Waypoint> = serde_json::from_str(&self.waypoints_json)
            .map_err(|e| WaymarkError::corrupt_record(&id, "waypointsJson", e))?;
        let route_feature: RouteFeature = serde_json::from_str(&self.route_geojson)
            .map_err(|e| WaymarkError::corrupt_record(&id, "routeGeoJson", e))?;
        let profile = self
            .profile
            .parse::<RouteProfile>()
            .map_err(|e| WaymarkError::corrupt_record(&id, "profile", e))?;

        Ok(SavedRoute {
            created_at: parse_timestamp(&id, "createdAt", &self.created_at)?,
            updated_at: parse_timestamp(&id, "updatedAt", &self.updated_at)?,
            last_synced_at: self
                .last_synced_at
                .map(|s| parse_timestamp(&id, "lastSyncedAt", &s))
                .transpose()?,
            deleted_at: self
                .deleted_at
                .map(|s| parse_timestamp(&id, "deletedAt", &s))
                .transpose()?,
            distance_meters: self
                .distance_meters
                .map(|v| parse_metric(&id, "distanceMeters", v))
                .transpose()?,
            duration_seconds: self
                .duration_seconds
                .map(|v| parse_metric(&id, "durationSeconds", v))
                .transpose()?,
            name: self.name,
            profile,
            waypoints,
            route_feature,
            owner_uid: self.owner_uid,
            dirty: self.dirty != 0,
            id,
        })
    }
}

fn parse_timestamp(id: &str, field: &'static str, value: &str) -> Result<Timestamp> {
    value
        .parse::<Timestamp>()
        .map_err(|e| WaymarkError::corrupt_record(id, field, e))
}

fn parse_metric(id: &str, field: &'static str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|e| WaymarkError::corrupt_record(id, field, e))
}
