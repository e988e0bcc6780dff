//! `wm`, the Waymark command line.
//!
//! Plans routes through road-snapped waypoints, manages the saved routes in
//! the local database and searches for places by name or around a
//! coordinate.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use waymark_core::{params::ListRoutes, OsrmConfig, RouteStoreBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        osrm_url,
        profile,
        no_color,
        command,
    } = Args::parse();

    let store = RouteStoreBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to open route store")?;
    info!("Using route database at {}", store.database_path().display());

    let osrm = OsrmConfig::new().with_base_url(osrm_url).with_profile(profile);
    let cli = Cli::new(store, TerminalRenderer::new(!no_color), osrm);

    match command {
        Some(Route { command }) => cli.handle_route_command(command).await,
        Some(Plan(args)) => cli.plan(args, profile).await,
        Some(Explore(args)) => cli.explore(args).await,
        Some(Search(args)) => cli.search(args).await,
        Some(Locate(args)) => cli.locate(args).await,
        None => cli.list_routes(&ListRoutes::default()).await,
    }
}
