//! Core library for the Waymark route planner.
//!
//! The crate is built around [`WaypointSession`], the live plan: an ordered
//! list of road-snapped waypoints and the route geometry derived from it.
//! The session talks to two injected collaborators:
//!
//! - a [`GeoLookup`] for road snapping and path geometry, implemented over
//!   HTTP by [`OsrmClient`];
//! - a [`RouteRepository`] for saved routes, implemented over SQLite by
//!   [`RouteStore`].
//!
//! The [`places`] module adds the explore-nearby search and forward and
//! reverse geocoding, and [`display`] renders everything as markdown for the
//! terminal front end.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use waymark_core::{
//!     models::{RouteFilter, RouteProfile},
//!     OsrmClient, OsrmConfig, RouteRepository, RouteStoreBuilder, WaypointSession,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(
//!     RouteStoreBuilder::new()
//!         .with_database_path(Some("routes.db"))
//!         .build()
//!         .await?,
//! );
//! let lookup = Arc::new(OsrmClient::new(OsrmConfig::default())?);
//!
//! let session = WaypointSession::new(lookup, store.clone());
//! session.add_from_point(4.35, 50.85).await;
//! session.add_from_point(4.36, 50.86).await;
//! session
//!     .save_as_new_route("Morning Walk", RouteProfile::Walking)
//!     .await?;
//!
//! for route in store.list(&RouteFilter::default()).await? {
//!     println!("{}", route.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod lookup;
pub mod models;
pub mod params;
pub mod places;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use display::{
    CreateResult, DeleteResult, ExplorePlaces, LocalDateTime, OperationStatus, SavedRoutes,
    SearchResults, UpdateResult,
};
pub use error::{Result, WaymarkError};
pub use lookup::{GeoLookup, OsrmClient, OsrmConfig};
pub use models::{
    ExploreCategory, ExplorePlace, LonLat, NewRoute, PlaceContext, RouteFeature, RouteFilter,
    RouteProfile, SavedRoute, SearchResult, Waypoint,
};
pub use params::{ListRoutes, NearbySearch, PlaceSearch, RenameRoute, RouteId, SaveRoute};
pub use places::{NominatimClient, OverpassClient, PlacesConfig};
pub use session::{SessionOutcome, SessionSnapshot, WaypointSession};
pub use store::{RouteRepository, RouteStore, RouteStoreBuilder};
