//! Error types for the waymark library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for every waymark operation.
///
/// The variants group into three families that callers handle differently:
///
/// - **Lookup**: the routing, explore, or geocoding service failed.
/// - **Precondition**: the session is not in a state that allows the request
///   (for example saving with fewer than two waypoints).
/// - **Store**: the saved-route store could not read or write a record. See
///   [`WaymarkError::is_store_error`].
#[derive(Error, Debug)]
pub enum WaymarkError {
    /// Remote service unreachable, non-success response, or empty/malformed
    /// result
    #[error("Lookup error: {message}")]
    Lookup {
        message: String,
        /// HTTP status returned by the service, if it answered at all
        status: Option<u16>,
    },
    /// The requested operation is not allowed in the current session state
    #[error("{reason}")]
    Precondition { reason: String },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// A stored row could not be decoded into a saved route
    #[error("Corrupt route record '{id}': invalid {field} ({reason})")]
    CorruptRecord {
        id: String,
        field: &'static str,
        reason: String,
    },
    /// Saved route not found for the given ID
    #[error("Route with ID {id} not found")]
    RouteNotFound { id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> WaymarkError {
        WaymarkError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> WaymarkError {
        WaymarkError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl WaymarkError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a lookup error without an HTTP status.
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
            status: None,
        }
    }

    /// Creates a lookup error for a non-success HTTP response.
    pub fn lookup_status(message: impl Into<String>, status: u16) -> Self {
        Self::Lookup {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Creates a precondition error.
    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::Precondition {
            reason: reason.into(),
        }
    }

    /// Creates a corrupt-record error for a field of a stored route.
    pub fn corrupt_record(
        id: impl Into<String>,
        field: &'static str,
        reason: impl ToString,
    ) -> Self {
        Self::CorruptRecord {
            id: id.into(),
            field,
            reason: reason.to_string(),
        }
    }

    /// Whether this error came from the saved-route store.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::Database { .. } | Self::CorruptRecord { .. } | Self::RouteNotFound { .. }
        )
    }

    /// Whether this error came from a remote lookup service.
    pub fn is_lookup_error(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }
}

impl From<reqwest::Error> for WaymarkError {
    fn from(err: reqwest::Error) -> Self {
        Self::Lookup {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for WaymarkError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {err}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| WaymarkError::database(message).with_source(e))
    }
}

/// Result type alias for waymark operations
pub type Result<T> = std::result::Result<T, WaymarkError>;
