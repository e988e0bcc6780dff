//! Saved-route store.
//!
//! [`RouteRepository`] is the record-store contract the waypoint session
//! depends on. [`RouteStore`] implements it on top of SQLite: every call opens
//! its own connection on the blocking thread pool, so the store handle is just
//! a path and can be cloned freely between tasks.
//!
//! # Example
//!
//! ```rust
//! use waymark_core::{RouteRepository, RouteStoreBuilder, models::RouteFilter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RouteStoreBuilder::new()
//!     .with_database_path(Some("routes.db"))
//!     .build()
//!     .await?;
//!
//! for route in store.list(&RouteFilter::default()).await? {
//!     println!("{} ({})", route.name, route.id);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::task;

use crate::{
    db::Database,
    error::Result,
    models::{NewRoute, RouteFilter, SavedRoute},
};

pub mod builder;


pub use builder::RouteStoreBuilder;

/// Record-store contract for saved routes.
///
/// Writes to different ids are independent. Writes to the same id are last
/// write wins.
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Builds a new dirty record from the input. Does not persist it.
    fn create(&self, input: NewRoute) -> SavedRoute {
        SavedRoute::create(input)
    }

    /// Upserts the full record keyed by its id.
    async fn persist(&self, route: &SavedRoute) -> Result<()>;

    /// Lists routes newest `createdAt` first. Soft-deleted routes are
    /// excluded unless the filter asks for them.
    async fn list(&self, filter: &RouteFilter) -> Result<Vec<SavedRoute>>;

    /// Retrieves a route by id, including soft-deleted ones.
    async fn get(&self, id: &str) -> Result<Option<SavedRoute>>;

    /// Updates the name and `updatedAt`, and marks the route dirty.
    async fn rename(&self, id: &str, name: &str) -> Result<SavedRoute>;

    /// Stamps `deletedAt` and `updatedAt`, and marks the route dirty.
    async fn soft_delete(&self, id: &str) -> Result<SavedRoute>;

    /// Physically removes the route. Irreversible.
    async fn hard_delete(&self, id: &str) -> Result<()>;

    /// All dirty routes, optionally for one owner, for an external sync
    /// process.
    async fn list_dirty(&self, owner_uid: Option<&str>) -> Result<Vec<SavedRoute>>;

    /// Clears the dirty flag and stamps `lastSyncedAt`. Reserved for the
    /// sync collaborator.
    async fn mark_synced(&self, id: &str) -> Result<SavedRoute>;
}

/// SQLite-backed saved-route store.
#[derive(Debug, Clone)]
pub struct RouteStore {
    db_path: PathBuf,
}

impl RouteStore {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the underlying database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs a database operation on the blocking thread pool with a fresh
    /// connection.
    async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await?
    }
}

#[async_trait]
impl RouteRepository for RouteStore {
    async fn persist(&self, route: &SavedRoute) -> Result<()> {
        let route = route.clone();
        self.with_database(move |db| db.upsert_route(&route)).await
    }

    async fn list(&self, filter: &RouteFilter) -> Result<Vec<SavedRoute>> {
        let filter = filter.clone();
        self.with_database(move |db| db.list_routes(&filter)).await
    }

    async fn get(&self, id: &str) -> Result<Option<SavedRoute>> {
        let id = id.to_string();
        self.with_database(move |db| db.get_route(&id)).await
    }

    async fn rename(&self, id: &str, name: &str) -> Result<SavedRoute> {
        let id = id.to_string();
        let name = name.to_string();
        self.with_database(move |db| db.rename_route(&id, &name))
            .await
    }

    async fn soft_delete(&self, id: &str) -> Result<SavedRoute> {
        let id = id.to_string();
        self.with_database(move |db| db.soft_delete_route(&id)).await
    }

    async fn hard_delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.with_database(move |db| db.hard_delete_route(&id)).await
    }

    async fn list_dirty(&self, owner_uid: Option<&str>) -> Result<Vec<SavedRoute>> {
        let owner_uid = owner_uid.map(String::from);
        self.with_database(move |db| db.list_dirty_routes(owner_uid.as_deref()))
            .await
    }

    async fn mark_synced(&self, id: &str) -> Result<SavedRoute> {
        let id = id.to_string();
        self.with_database(move |db| db.mark_route_synced(&id)).await
    }
}
