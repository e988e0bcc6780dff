//! Markdown rendering for the terminal front end.
//!
//! Domain models get their `Display` implementations in [`models`], kept
//! out of the model definitions. Collections and operation results are
//! wrapped in the types below so the same data can be framed differently
//! depending on context: a route on its own, a route in a listing, or a
//! route just saved.
//!
//! ```rust
//! use waymark_core::display::{OperationStatus, SavedRoutes};
//!
//! assert_eq!(SavedRoutes(vec![]).to_string(), "No saved routes found.\n");
//! assert_eq!(
//!     OperationStatus::failure("OSRM route failed (503)".to_string()).to_string(),
//!     "Error: OSRM route failed (503)\n"
//! );
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{ExplorePlaces, SavedRoutes, SearchResults};
pub use datetime::{Length, LocalDateTime, TravelTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
