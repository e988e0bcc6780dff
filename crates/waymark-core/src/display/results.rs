//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::SavedRoute;

/// A newly saved route with a confirmation line.
///
/// # Examples
///
/// ```rust
/// use waymark_core::{
///     display::CreateResult,
///     models::{NewRoute, RouteFeature, RouteProfile, SavedRoute},
/// };
///
/// let route = SavedRoute::create(NewRoute::from_session(
///     "Morning Walk".to_string(),
///     RouteProfile::Walking,
///     vec![],
///     RouteFeature::new(vec![[4.35, 50.85], [4.36, 50.86]]),
/// ));
///
/// let output = CreateResult::new(route).to_string();
/// assert!(output.starts_with("Saved route 'Morning Walk' with ID: route_"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<SavedRoute> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Saved route '{}' with ID: {}",
            self.resource.name, self.resource.id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// An updated route, with the list of changes applied.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<SavedRoute> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated route with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Confirmation that a route was deleted. Soft deletes can be listed again
/// with `include_deleted`; purges are permanent.
pub struct DeleteResult<T> {
    pub resource: T,
    pub permanent: bool,
}

impl<T> DeleteResult<T> {
    pub fn soft(resource: T) -> Self {
        Self {
            resource,
            permanent: false,
        }
    }

    pub fn permanent(resource: T) -> Self {
        Self {
            resource,
            permanent: true,
        }
    }
}

impl fmt::Display for DeleteResult<SavedRoute> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.permanent { "Purged" } else { "Deleted" };
        writeln!(
            f,
            "{verb} route '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}
