use std::path::PathBuf;

use clap::{Parser, Subcommand};
use waymark_core::{lookup::osrm::DEFAULT_OSRM_URL, models::RouteProfile};

use crate::cli::{ExploreArgs, LocateArgs, PlanArgs, RouteCommands, SearchArgs};

/// Plan walking routes and manage the ones you saved
///
/// Waymark snaps the points you give it to the road network, asks an OSRM
/// server for the path between them, and keeps named routes in a local
/// SQLite database. It can also find places by name, search for points of
/// interest nearby and reverse geocode a coordinate.
#[derive(Parser)]
#[command(version, about, name = "wm")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waymark/routes.db
    #[arg(long, global = true, env = "WAYMARK_DATABASE")]
    pub database_file: Option<PathBuf>,

    /// Base URL of the OSRM server used for snapping and routing
    #[arg(long, global = true, env = "WAYMARK_OSRM_URL", default_value = DEFAULT_OSRM_URL)]
    pub osrm_url: String,

    /// Routing profile (walking, driving, cycling)
    #[arg(long, global = true, default_value = "walking")]
    pub profile: RouteProfile,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Waymark CLI
///
/// With no command, the saved routes are listed.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage saved routes
    #[command(alias = "r")]
    Route {
        #[command(subcommand)]
        command: RouteCommands,
    },
    /// Plan a route through a list of points and optionally save it
    #[command(alias = "p")]
    Plan(PlanArgs),
    /// Search for points of interest around a location
    #[command(alias = "e")]
    Explore(ExploreArgs),
    /// Find places by name or address
    #[command(alias = "s")]
    Search(SearchArgs),
    /// Reverse geocode a coordinate
    #[command(alias = "l")]
    Locate(LocateArgs),
}
