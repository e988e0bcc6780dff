//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper owns its items and prints a fixed message when empty.

use std::{fmt, ops::Index};

use crate::models::{ExplorePlace, SavedRoute, SearchResult};

/// Saved routes as a listing, one compact entry per route.
///
/// # Examples
///
/// ```rust
/// use waymark_core::{
///     display::SavedRoutes,
///     models::{NewRoute, RouteFeature, RouteProfile, SavedRoute},
/// };
///
/// let route = SavedRoute::create(NewRoute::from_session(
///     "Canal Loop".to_string(),
///     RouteProfile::Walking,
///     vec![],
///     RouteFeature::new(vec![[4.35, 50.85], [4.36, 50.86]]),
/// ));
///
/// let output = SavedRoutes(vec![route]).to_string();
/// assert!(output.contains("Canal Loop"));
/// assert_eq!(SavedRoutes(vec![]).to_string(), "No saved routes found.\n");
/// ```
pub struct SavedRoutes(pub Vec<SavedRoute>);

impl SavedRoutes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SavedRoute> {
        self.0.iter()
    }
}

impl Index<usize> for SavedRoutes {
    type Output = SavedRoute;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for SavedRoutes {
    type Item = SavedRoute;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for SavedRoutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No saved routes found.");
        }
        for route in &self.0 {
            route.fmt_summary(f)?;
        }
        Ok(())
    }
}

/// Explore-nearby results, nearest first as returned by the search.
pub struct ExplorePlaces(pub Vec<ExplorePlace>);

impl ExplorePlaces {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ExplorePlaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No places found.");
        }
        for place in &self.0 {
            write!(f, "{place}")?;
        }
        Ok(())
    }
}

/// Place search matches, in the service's ranking order.
pub struct SearchResults(pub Vec<SearchResult>);

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No matching places.");
        }
        for result in &self.0 {
            write!(f, "{result}")?;
        }
        Ok(())
    }
}
