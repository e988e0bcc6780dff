//! Display implementations for domain models.
//!
//! Every implementation writes markdown: a header line, a metadata bullet
//! list, then nested sections.

use std::fmt;

use super::datetime::{Length, LocalDateTime, TravelTime};
use crate::{
    models::{ExplorePlace, PlaceContext, RouteFeature, SavedRoute, SearchResult, Waypoint},
    places::{describe_place_type, format_address, pick_useful_info},
    session::SessionSnapshot,
};

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lon, self.lat)?;
        let labels: Vec<&str> = [&self.region, &self.country]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        if !labels.is_empty() {
            write!(f, " ({})", labels.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for RouteFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} points", self.len())?;
        if let Some(meters) = self.distance_meters() {
            write!(f, ", {}", Length(meters))?;
        }
        if let Some(seconds) = self.duration_seconds() {
            write!(f, ", {}", TravelTime(seconds))?;
        }
        Ok(())
    }
}

fn write_waypoints(f: &mut fmt::Formatter<'_>, waypoints: &[Waypoint]) -> fmt::Result {
    for (index, waypoint) in waypoints.iter().enumerate() {
        writeln!(f, "{}. {waypoint}", index + 1)?;
    }
    Ok(())
}

impl fmt::Display for SavedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Profile: {}", self.profile)?;
        if let Some(meters) = self.distance_meters {
            writeln!(f, "- Distance: {}", Length(f64::from(meters)))?;
        }
        if let Some(seconds) = self.duration_seconds {
            writeln!(f, "- Duration: {}", TravelTime(f64::from(seconds)))?;
        }
        if let Some(owner) = &self.owner_uid {
            writeln!(f, "- Owner: {owner}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        if let Some(deleted) = &self.deleted_at {
            writeln!(f, "- Deleted: {}", LocalDateTime(deleted))?;
        }
        match (&self.last_synced_at, self.dirty) {
            (_, true) => writeln!(f, "- Sync: pending")?,
            (Some(synced), false) => writeln!(f, "- Sync: {}", LocalDateTime(synced))?,
            (None, false) => writeln!(f, "- Sync: up to date")?,
        }

        writeln!(f, "\n## Waypoints")?;
        writeln!(f)?;
        write_waypoints(f, &self.waypoints)?;

        writeln!(f, "\n## Geometry")?;
        writeln!(f)?;
        writeln!(f, "{}", self.route_feature)
    }
}

impl SavedRoute {
    /// Compact entry used in route listings.
    pub(crate) fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deleted = if self.is_deleted() { " [deleted]" } else { "" };
        writeln!(f, "## {} (ID: {}){deleted}", self.name, self.id)?;
        writeln!(f)?;
        write!(f, "- **Profile**: {}, {} waypoints", self.profile, self.waypoints.len())?;
        if let Some(meters) = self.distance_meters {
            write!(f, ", {}", Length(f64::from(meters)))?;
        }
        writeln!(f)?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plan ({})", self.profile)?;
        writeln!(f)?;
        writeln!(f, "{}", self.status)?;

        if !self.waypoints.is_empty() {
            writeln!(f, "\n## Waypoints")?;
            writeln!(f)?;
            write_waypoints(f, &self.waypoints)?;
        }

        if let Some(geometry) = &self.route_geometry {
            writeln!(f, "\n## Route")?;
            writeln!(f)?;
            writeln!(f, "{geometry}")?;
        }

        Ok(())
    }
}

impl fmt::Display for ExplorePlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = describe_place_type(&self.tags);
        write!(f, "## {} ({})", self.name, kind.label)?;
        if let Some(meters) = self.distance_meters {
            write!(f, " · {}", Length(meters))?;
        }
        writeln!(f)?;
        writeln!(f)?;

        writeln!(f, "- **ID**: {}", self.id)?;
        writeln!(f, "- **Location**: {:.6}, {:.6}", self.lon, self.lat)?;
        let address = format_address(&self.tags);
        if !address.is_empty() {
            writeln!(f, "- **Address**: {address}")?;
        }

        let info = pick_useful_info(&self.tags);
        for (label, value) in [
            ("Website", &info.website),
            ("Phone", &info.phone),
            ("Opening hours", &info.opening_hours),
            ("Cuisine", &info.cuisine),
        ] {
            if !value.is_empty() {
                writeln!(f, "- **{label}**: {value}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for PlaceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.best_city().unwrap_or_else(|| "Unknown place".to_string()))?;
        writeln!(f)?;

        let street = match (&self.road, &self.house_number) {
            (Some(road), Some(number)) => Some(format!("{road} {number}")),
            (Some(road), None) => Some(road.clone()),
            _ => None,
        };
        let fields = [
            ("Street", street.as_ref()),
            ("Postcode", self.postcode.as_ref()),
            ("State", self.state.as_ref()),
            ("Country", self.country.as_ref()),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                writeln!(f, "- {label}: {value}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.display_name)?;
        writeln!(f)?;
        writeln!(f, "- **Location**: {:.6}, {:.6}", self.lon, self.lat)?;
        if let Some(region) = &self.region {
            writeln!(f, "- **Region**: {region}")?;
        }
        if let Some(country) = &self.country {
            writeln!(f, "- **Country**: {country}")?;
        }
        writeln!(f)
    }
}
