//! Routing profiles.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Travel mode passed to the routing service and recorded on saved routes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RouteProfile {
    #[default]
    Walking,
    Driving,
    Cycling,
}

impl RouteProfile {
    /// String used both in service URLs and in the `profile` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteProfile::Walking => "walking",
            RouteProfile::Driving => "driving",
            RouteProfile::Cycling => "cycling",
        }
    }
}

impl FromStr for RouteProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "walking" | "foot" => Ok(RouteProfile::Walking),
            "driving" | "car" => Ok(RouteProfile::Driving),
            "cycling" | "bike" => Ok(RouteProfile::Cycling),
            _ => Err(format!("Invalid route profile: {s}")),
        }
    }
}

impl fmt::Display for RouteProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
