//! Database operations and SQLite management for saved routes.
//!
//! This module holds the synchronous SQLite layer: connection setup, schema
//! management, and the queries behind the saved-route store. The async
//! [`crate::store::RouteStore`] runs these on the blocking thread pool.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod route_queries;
mod rows;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
