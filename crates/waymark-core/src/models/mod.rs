//! Data models for waypoints, route geometry, and saved routes.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping the data structures free of
//! presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use waymark_core::models::{LonLat, RouteFeature, Waypoint};
//!
//! let a = Waypoint::new(LonLat::new(4.35, 50.85));
//! let b = Waypoint::new(LonLat::new(4.36, 50.86)).with_labels(Some("Brussels".into()), None);
//! assert_ne!(a.id, b.id);
//!
//! let line = RouteFeature::new(vec![a.position().into(), b.position().into()]);
//! assert_eq!(line.len(), 2);
//! ```

pub mod feature;
pub mod filters;
pub mod place;
pub mod profile;
pub mod route;
pub mod waypoint;

#[cfg(test)]
mod tests;

pub use feature::{Bounds, FeatureType, LineString, LineStringType, Position, RouteFeature};
pub use filters::RouteFilter;
pub use place::{
    ExploreCategory, ExplorePlace, PlaceContext, PlaceType, SearchResult, UsefulInfo,
};
pub use profile::RouteProfile;
pub use route::{NewRoute, SavedRoute};
pub use waypoint::{LonLat, Waypoint};
