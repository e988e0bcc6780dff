//! Saved route CRUD operations and queries.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, OptionalExtension, ToSql};

use super::rows::{RouteRow, ROUTE_COLUMNS};
use crate::{
    error::{DatabaseResultExt, Result, WaymarkError},
    models::{RouteFilter, SavedRoute},
};

// Last write wins; the rowid survives so insertion order stays stable.
const UPSERT_ROUTE_SQL: &str = "INSERT INTO routes \
     (id, name, createdAt, updatedAt, profile, waypointsJson, routeGeoJson, distanceMeters, \
      durationSeconds, ownerUid, dirty, lastSyncedAt, deletedAt) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13) \
     ON CONFLICT(id) DO UPDATE SET \
       name = excluded.name, createdAt = excluded.createdAt, updatedAt = excluded.updatedAt, \
       profile = excluded.profile, waypointsJson = excluded.waypointsJson, \
       routeGeoJson = excluded.routeGeoJson, distanceMeters = excluded.distanceMeters, \
       durationSeconds = excluded.durationSeconds, ownerUid = excluded.ownerUid, \
       dirty = excluded.dirty, lastSyncedAt = excluded.lastSyncedAt, deletedAt = excluded.deletedAt";
const RENAME_ROUTE_SQL: &str = "UPDATE routes SET name = ?1, updatedAt = ?2, dirty = 1 WHERE id = ?3";
const SOFT_DELETE_ROUTE_SQL: &str =
    "UPDATE routes SET deletedAt = ?1, updatedAt = ?1, dirty = 1 WHERE id = ?2";
const MARK_SYNCED_SQL: &str = "UPDATE routes SET dirty = 0, lastSyncedAt = ?1 WHERE id = ?2";
const HARD_DELETE_ROUTE_SQL: &str = "DELETE FROM routes WHERE id = ?1";

// julianday() orders mixed-precision ISO strings correctly; rowid breaks ties.
const NEWEST_FIRST: &str = "ORDER BY julianday(createdAt) DESC, rowid DESC";
const OLDEST_CHANGE_FIRST: &str = "ORDER BY julianday(updatedAt) ASC, rowid ASC";

impl super::Database {
    /// Inserts the route, or overwrites every column of the existing row with
    /// the same id. No timestamp comparison is performed.
    pub fn upsert_route(&mut self, route: &SavedRoute) -> Result<()> {
        let row = RouteRow::encode(route)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPSERT_ROUTE_SQL,
            params![
                row.id,
                row.name,
                row.created_at,
                row.updated_at,
                row.profile,
                row.waypoints_json,
                row.route_geojson,
                row.distance_meters,
                row.duration_seconds,
                row.owner_uid,
                row.dirty,
                row.last_synced_at,
                row.deleted_at,
            ],
        )
        .db_context("Failed to upsert route")?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Persisted route {}", route.id);
        Ok(())
    }

    /// Retrieves a route by its ID, deleted or not.
    pub fn get_route(&self, id: &str) -> Result<Option<SavedRoute>> {
        let sql = format!("SELECT {ROUTE_COLUMNS} FROM routes WHERE id = ?1");
        let row = self
            .connection
            .query_row(&sql, params![id], RouteRow::from_row)
            .optional()
            .db_context("Failed to query route")?;

        row.map(RouteRow::decode).transpose()
    }

    /// Lists routes, newest `createdAt` first.
    pub fn list_routes(&self, filter: &RouteFilter) -> Result<Vec<SavedRoute>> {
        let mut conditions = Vec::new();
        let mut params_vec: Vec<&dyn ToSql> = Vec::new();

        if !filter.include_deleted {
            conditions.push("deletedAt IS NULL");
        }

        if let Some(owner) = &filter.owner_uid {
            conditions.push("ownerUid = ?");
            params_vec.push(owner);
        }

        self.query_routes(&conditions, &params_vec, NEWEST_FIRST)
    }

    /// Lists every route awaiting synchronization, oldest change first.
    /// Soft-deleted routes are included so the deletion can be propagated.
    pub fn list_dirty_routes(&self, owner_uid: Option<&str>) -> Result<Vec<SavedRoute>> {
        let mut conditions = vec!["dirty = 1"];
        let mut params_vec: Vec<&dyn ToSql> = Vec::new();

        if let Some(owner) = &owner_uid {
            conditions.push("ownerUid = ?");
            params_vec.push(owner);
        }

        self.query_routes(&conditions, &params_vec, OLDEST_CHANGE_FIRST)
    }

    fn query_routes(
        &self,
        conditions: &[&str],
        params: &[&dyn ToSql],
        order: &str,
    ) -> Result<Vec<SavedRoute>> {
        let mut query = format!("SELECT {ROUTE_COLUMNS} FROM routes");
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push(' ');
        query.push_str(order);

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params, RouteRow::from_row)
            .db_context("Failed to query routes")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch routes")?;

        rows.into_iter().map(RouteRow::decode).collect()
    }

    /// Renames a route and marks it dirty. Names are not checked for
    /// uniqueness here.
    pub fn rename_route(&mut self, id: &str, name: &str) -> Result<SavedRoute> {
        let now = Timestamp::now().to_string();
        self.update_existing(id, RENAME_ROUTE_SQL, params![name, now, id], "rename")
    }

    /// Marks a route deleted without removing the row.
    pub fn soft_delete_route(&mut self, id: &str) -> Result<SavedRoute> {
        let now = Timestamp::now().to_string();
        self.update_existing(id, SOFT_DELETE_ROUTE_SQL, params![now, id], "soft delete")
    }

    /// Clears the dirty flag and stamps `lastSyncedAt`.
    pub fn mark_route_synced(&mut self, id: &str) -> Result<SavedRoute> {
        let now = Timestamp::now().to_string();
        self.update_existing(id, MARK_SYNCED_SQL, params![now, id], "mark synced")
    }

    /// Runs a single-row update and returns the updated route, or
    /// `RouteNotFound` when no row has the id.
    fn update_existing(
        &mut self,
        id: &str,
        sql: &str,
        params: &[&dyn ToSql],
        action: &str,
    ) -> Result<SavedRoute> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let rows_affected = tx
            .execute(sql, params)
            .map_err(|e| WaymarkError::database(format!("Failed to {action} route")).with_source(e))?;

        if rows_affected == 0 {
            return Err(WaymarkError::RouteNotFound { id: id.to_string() });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_route(id)?
            .ok_or_else(|| WaymarkError::RouteNotFound { id: id.to_string() })
    }

    /// Permanently deletes a route. This operation cannot be undone.
    pub fn hard_delete_route(&mut self, id: &str) -> Result<()> {
        let rows_affected = self
            .connection
            .execute(HARD_DELETE_ROUTE_SQL, params![id])
            .db_context("Failed to delete route")?;

        if rows_affected == 0 {
            return Err(WaymarkError::RouteNotFound { id: id.to_string() });
        }

        Ok(())
    }
}
