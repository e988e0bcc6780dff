//! Builder for creating and configuring RouteStore instances.

use std::path::{Path, PathBuf};

use log::info;
use tokio::task;

use super::RouteStore;
use crate::{
    db::Database,
    error::{Result, WaymarkError},
};

/// Builder for creating and configuring RouteStore instances.
#[derive(Debug, Clone, Default)]
pub struct RouteStoreBuilder {
    database_path: Option<PathBuf>,
}

impl RouteStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/waymark/routes.db` or `~/.local/share/waymark/routes.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the store, creating the database file and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `WaymarkError::FileSystem` if the parent directory cannot be
    /// created, `WaymarkError::XdgDirectory` if no default location exists,
    /// and `WaymarkError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<RouteStore> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| WaymarkError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || Database::new(&db_path_clone).map(drop)).await??;

        info!("Route store ready at {}", db_path.display());
        Ok(RouteStore::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waymark")
            .place_data_file("routes.db")
            .map_err(|e| WaymarkError::XdgDirectory(e.to_string()))
    }
}
