//! Database schema initialization and migrations.

use log::info;

use crate::error::{DatabaseResultExt, Result};

/// Columns added after the first release of the routes table.
const LATE_COLUMNS: [(&str, &str); 2] = [
    ("lastSyncedAt", "ALTER TABLE routes ADD COLUMN lastSyncedAt TEXT"),
    ("deletedAt", "ALTER TABLE routes ADD COLUMN deletedAt TEXT"),
];

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .db_context("Failed to enable WAL journal mode")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        for (column, ddl) in LATE_COLUMNS {
            if !self.has_column("routes", column)? {
                info!("Migrating routes table: adding column {column}");
                self.connection
                    .execute(ddl, [])
                    .db_context("Failed to add column to routes table")?;
            }
        }

        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .db_context("Failed to inspect table columns")
    }
}
