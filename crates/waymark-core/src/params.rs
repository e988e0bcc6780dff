//! Parameter structures for waymark operations
//!
//! Plain parameter structs shared by every front end. Interface layers (the
//! CLI today) define their own argument types with framework derives and
//! convert into these with `From`, so the core never depends on clap.
//!
//! ```ignore
//! // In the CLI crate
//! #[derive(Args)]
//! pub struct RenameRouteArgs {
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! impl From<RenameRouteArgs> for RenameRoute {
//!     fn from(val: RenameRouteArgs) -> Self {
//!         RenameRoute { id: val.id, name: val.name }
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{ExploreCategory, LonLat, RouteProfile};

/// Default number of elements requested from the explore search.
pub const DEFAULT_EXPLORE_LIMIT: u32 = 250;

/// Default number of matches requested from the place search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 6;

/// Queries shorter than this, once trimmed, are not sent.
pub const MIN_SEARCH_QUERY_LEN: usize = 3;

/// Generic parameters for operations requiring just a route ID.
///
/// Used by show, soft delete, hard delete and mark-synced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteId {
    /// The ID of the saved route to operate on
    pub id: String,
}

/// Parameters for listing saved routes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRoutes {
    /// Include soft-deleted routes
    #[serde(default)]
    pub include_deleted: bool,
    /// Only routes tagged with this owner
    pub owner_uid: Option<String>,
}

/// Parameters for renaming a saved route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameRoute {
    pub id: String,
    /// New display name; stored as given, without uniqueness checks
    pub name: String,
}

/// Parameters for saving the current session as a new route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveRoute {
    /// Draft name; trimmed, defaulted and de-duplicated before use
    pub name: String,
    #[serde(default)]
    pub profile: RouteProfile,
}

/// Parameters for the explore-nearby search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbySearch {
    pub center: LonLat,
    pub radius_meters: f64,
    pub categories: Vec<ExploreCategory>,
    /// Maximum number of elements the service should return
    pub limit: u32,
    /// Compute the distance from `center` for each place
    pub with_distance: bool,
}

impl NearbySearch {
    /// A search with the default limit that computes distances.
    pub fn new(center: LonLat, radius_meters: f64, categories: Vec<ExploreCategory>) -> Self {
        Self {
            center,
            radius_meters,
            categories,
            limit: DEFAULT_EXPLORE_LIMIT,
            with_distance: true,
        }
    }
}

/// Parameters for the forward place search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceSearch {
    pub query: String,
    pub limit: u32,
}

impl PlaceSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}
