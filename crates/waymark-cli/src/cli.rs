//! Command definitions and their handlers.
//!
//! Argument structs carry the clap derives and convert into the core's
//! plain parameter types with `From`, so `waymark-core` never depends on
//! clap:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Store / Session
//! ```

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use log::info;
use waymark_core::{
    display::{
        CreateResult, DeleteResult, ExplorePlaces, OperationStatus, SavedRoutes, SearchResults,
        UpdateResult,
    },
    models::{ExploreCategory, LonLat, RouteFilter, RouteProfile},
    params::{
        ListRoutes, NearbySearch, PlaceSearch, RenameRoute, RouteId, SaveRoute,
        DEFAULT_EXPLORE_LIMIT, DEFAULT_SEARCH_LIMIT,
    },
    places::{PlacesConfig, DEFAULT_NOMINATIM_URL, DEFAULT_OVERPASS_URL},
    NominatimClient, OsrmClient, OsrmConfig, OverpassClient, RouteRepository, RouteStore,
    SessionOutcome, WaypointSession,
};

use crate::renderer::TerminalRenderer;

/// List saved routes, newest first
#[derive(Args)]
pub struct ListRoutesArgs {
    #[arg(long, help = "Include soft-deleted routes")]
    pub all: bool,
    #[arg(long, help = "Only routes tagged with this owner")]
    pub owner: Option<String>,
}

impl From<ListRoutesArgs> for ListRoutes {
    fn from(val: ListRoutesArgs) -> Self {
        ListRoutes {
            include_deleted: val.all,
            owner_uid: val.owner,
        }
    }
}

/// Identifies one saved route
#[derive(Args)]
pub struct RouteIdArgs {
    #[arg(help = "ID of the saved route, e.g. route_3f2a...")]
    pub id: String,
}

impl From<RouteIdArgs> for RouteId {
    fn from(val: RouteIdArgs) -> Self {
        RouteId { id: val.id }
    }
}

/// Rename a saved route
///
/// The new name is stored as given. Unlike saving, renaming does not add a
/// suffix when another route already uses the name.
#[derive(Args)]
pub struct RenameRouteArgs {
    #[arg(help = "ID of the route to rename")]
    pub id: String,
    #[arg(help = "New display name")]
    pub name: String,
}

impl From<RenameRouteArgs> for RenameRoute {
    fn from(val: RenameRouteArgs) -> Self {
        RenameRoute {
            id: val.id,
            name: val.name,
        }
    }
}

/// Permanently remove a saved route
#[derive(Args)]
pub struct PurgeRouteArgs {
    #[arg(help = "ID of the route to remove permanently")]
    pub id: String,
    /// Confirm the purge (required to prevent accidental data loss)
    #[arg(long)]
    pub confirm: bool,
}

/// List routes not yet synchronized, oldest change first
#[derive(Args)]
pub struct DirtyRoutesArgs {
    #[arg(long, help = "Only routes tagged with this owner")]
    pub owner: Option<String>,
}

#[derive(Subcommand)]
pub enum RouteCommands {
    /// List saved routes
    #[command(aliases = ["l", "ls"])]
    List(ListRoutesArgs),
    /// Show a saved route with its waypoints
    #[command(alias = "s")]
    Show(RouteIdArgs),
    /// Rename a saved route
    #[command(alias = "mv")]
    Rename(RenameRouteArgs),
    /// Soft-delete a saved route
    #[command(alias = "rm")]
    Delete(RouteIdArgs),
    /// Permanently remove a saved route
    Purge(PurgeRouteArgs),
    /// List routes awaiting synchronization
    Dirty(DirtyRoutesArgs),
    /// Mark a route as synchronized
    MarkSynced(RouteIdArgs),
}

/// Plan a route through points given as LON,LAT
///
/// Each point is snapped to the road network and appended in order, exactly
/// as tapping the map would. Places named with --search are looked up and
/// their best match appended after the points. With --save the result is
/// stored under a unique name.
#[derive(Args)]
pub struct PlanArgs {
    #[arg(
        required_unless_present = "search",
        allow_hyphen_values = true,
        value_name = "LON,LAT",
        help = "Points to visit, in order"
    )]
    pub points: Vec<LonLat>,
    #[arg(long, value_name = "NAME", help = "Save the planned route under this name")]
    pub save: Option<String>,
    #[arg(long, help = "Owner tag stamped on the saved route")]
    pub owner: Option<String>,
    #[arg(long, value_name = "QUERY", help = "Append the best match for a place search")]
    pub search: Vec<String>,
    #[arg(long, env = "WAYMARK_NOMINATIM_URL", default_value = DEFAULT_NOMINATIM_URL)]
    pub nominatim_url: String,
}

/// Find places by name or address
#[derive(Args)]
pub struct SearchArgs {
    #[arg(help = "Free-text query, at least 3 characters")]
    pub query: String,
    #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT, help = "Maximum number of matches")]
    pub limit: u32,
    #[arg(long, env = "WAYMARK_NOMINATIM_URL", default_value = DEFAULT_NOMINATIM_URL)]
    pub nominatim_url: String,
}

impl From<SearchArgs> for PlaceSearch {
    fn from(val: SearchArgs) -> Self {
        PlaceSearch {
            query: val.query,
            limit: val.limit,
        }
    }
}

/// Search for points of interest around a location
#[derive(Args)]
pub struct ExploreArgs {
    #[arg(long, allow_hyphen_values = true, help = "Longitude of the search center")]
    pub lon: f64,
    #[arg(long, allow_hyphen_values = true, help = "Latitude of the search center")]
    pub lat: f64,
    #[arg(long, default_value_t = 1000.0, help = "Search radius in meters")]
    pub radius: f64,
    #[arg(
        long = "category",
        value_delimiter = ',',
        help = "Categories to include (sights, hotels, nature, cafes, restaurants); all by default"
    )]
    pub categories: Vec<ExploreCategory>,
    #[arg(long, default_value_t = DEFAULT_EXPLORE_LIMIT, help = "Maximum number of results requested")]
    pub limit: u32,
    #[arg(long, env = "WAYMARK_OVERPASS_URL", default_value = DEFAULT_OVERPASS_URL)]
    pub overpass_url: String,
}

impl From<ExploreArgs> for NearbySearch {
    fn from(val: ExploreArgs) -> Self {
        let categories = if val.categories.is_empty() {
            ExploreCategory::ALL.to_vec()
        } else {
            val.categories
        };
        NearbySearch {
            limit: val.limit,
            ..NearbySearch::new(LonLat::new(val.lon, val.lat), val.radius, categories)
        }
    }
}

/// Reverse geocode a coordinate
#[derive(Args)]
pub struct LocateArgs {
    #[arg(allow_hyphen_values = true, help = "Longitude")]
    pub lon: f64,
    #[arg(allow_hyphen_values = true, help = "Latitude")]
    pub lat: f64,
    #[arg(long, env = "WAYMARK_NOMINATIM_URL", default_value = DEFAULT_NOMINATIM_URL)]
    pub nominatim_url: String,
}

/// Runs commands against the store and the remote services.
pub struct Cli {
    store: Arc<RouteStore>,
    renderer: TerminalRenderer,
    osrm: OsrmConfig,
}

impl Cli {
    pub fn new(store: RouteStore, renderer: TerminalRenderer, osrm: OsrmConfig) -> Self {
        Self {
            store: Arc::new(store),
            renderer,
            osrm,
        }
    }

    pub async fn handle_route_command(&self, command: RouteCommands) -> Result<()> {
        match command {
            RouteCommands::List(args) => self.list_routes(&args.into()).await,
            RouteCommands::Show(args) => self.show_route(&args.into()).await,
            RouteCommands::Rename(args) => self.rename_route(&args.into()).await,
            RouteCommands::Delete(args) => self.delete_route(&args.into()).await,
            RouteCommands::Purge(args) => self.purge_route(&args).await,
            RouteCommands::Dirty(args) => self.list_dirty(args.owner.as_deref()).await,
            RouteCommands::MarkSynced(args) => self.mark_synced(&args.into()).await,
        }
    }

    pub async fn list_routes(&self, params: &ListRoutes) -> Result<()> {
        let routes = self
            .store
            .list(&RouteFilter::from(params))
            .await
            .context("Failed to list routes")?;
        self.renderer.render(&SavedRoutes(routes).to_string())
    }

    async fn show_route(&self, params: &RouteId) -> Result<()> {
        match self.store.get(&params.id).await? {
            Some(route) => self.renderer.render(&route.to_string()),
            None => bail!("Route with ID {} not found", params.id),
        }
    }

    async fn rename_route(&self, params: &RenameRoute) -> Result<()> {
        let route = self.store.rename(&params.id, &params.name).await?;
        let changes = vec![format!("Renamed to '{}'", route.name)];
        self.renderer
            .render(&UpdateResult::with_changes(route, changes).to_string())
    }

    async fn delete_route(&self, params: &RouteId) -> Result<()> {
        let route = self.store.soft_delete(&params.id).await?;
        self.renderer.render(&DeleteResult::soft(route).to_string())
    }

    async fn purge_route(&self, args: &PurgeRouteArgs) -> Result<()> {
        if !args.confirm {
            bail!(
                "Purging route {} cannot be undone. Re-run with --confirm to proceed.",
                args.id
            );
        }
        let route = self
            .store
            .get(&args.id)
            .await?
            .with_context(|| format!("Route with ID {} not found", args.id))?;
        self.store.hard_delete(&args.id).await?;
        info!("Purged route {}", args.id);
        self.renderer.render(&DeleteResult::permanent(route).to_string())
    }

    async fn list_dirty(&self, owner: Option<&str>) -> Result<()> {
        let routes = self.store.list_dirty(owner).await?;
        self.renderer.render(&SavedRoutes(routes).to_string())
    }

    async fn mark_synced(&self, params: &RouteId) -> Result<()> {
        let route = self.store.mark_synced(&params.id).await?;
        self.renderer.render(
            &UpdateResult::with_changes(route, vec!["Marked as synchronized".to_string()])
                .to_string(),
        )
    }

    /// Drives a waypoint session through the given points, then saves it
    /// when asked.
    pub async fn plan(&self, args: PlanArgs, profile: RouteProfile) -> Result<()> {
        let lookup = OsrmClient::new(self.osrm.clone().with_profile(profile))?;
        let session = WaypointSession::new(Arc::new(lookup), self.store.clone())
            .with_profile(profile)
            .with_owner_uid(args.owner);

        for point in &args.points {
            let outcome = session.add_from_point(point.lon, point.lat).await;
            self.report_failure(&format!("{},{}", point.lon, point.lat), &outcome)?;
        }

        if !args.search.is_empty() {
            let nominatim = NominatimClient::new(&PlacesConfig {
                nominatim_url: args.nominatim_url.clone(),
                ..PlacesConfig::default()
            })?;
            for query in &args.search {
                let params = PlaceSearch {
                    limit: 1,
                    ..PlaceSearch::new(query.as_str())
                };
                let found = nominatim
                    .search(&params)
                    .await
                    .with_context(|| format!("Search for '{query}' failed"))?;
                let Some(place) = found.into_iter().next() else {
                    self.renderer.render(
                        &OperationStatus::failure(format!("{query}: no matching place"))
                            .to_string(),
                    )?;
                    continue;
                };
                info!("Adding '{}' for search '{query}'", place.display_name);
                let outcome = session
                    .add_from_search_result(place.lon, place.lat, place.region, place.country)
                    .await;
                self.report_failure(query, &outcome)?;
            }
        }

        self.renderer.render(&session.snapshot().to_string())?;

        match args.save {
            Some(name) => self.save(&session, &SaveRoute { name, profile }).await,
            None => Ok(()),
        }
    }

    /// Stores the session under the requested name and prints the result.
    async fn save(&self, session: &WaypointSession, params: &SaveRoute) -> Result<()> {
        let route = session
            .save_as_new_route(&params.name, params.profile)
            .await
            .context("Failed to save route")?;
        self.renderer.render(&CreateResult::new(route).to_string())
    }

    fn report_failure(&self, label: &str, outcome: &SessionOutcome) -> Result<()> {
        if let SessionOutcome::Failed { message } = outcome {
            self.renderer
                .render(&OperationStatus::failure(format!("{label}: {message}")).to_string())?;
        }
        Ok(())
    }

    pub async fn search(&self, args: SearchArgs) -> Result<()> {
        let config = PlacesConfig {
            nominatim_url: args.nominatim_url.clone(),
            ..PlacesConfig::default()
        };
        let client = NominatimClient::new(&config)?;
        let results = client
            .search(&PlaceSearch::from(args))
            .await
            .context("Place search failed")?;
        self.renderer.render(&SearchResults(results).to_string())
    }

    pub async fn explore(&self, args: ExploreArgs) -> Result<()> {
        let config = PlacesConfig {
            overpass_url: args.overpass_url.clone(),
            ..PlacesConfig::default()
        };
        let client = OverpassClient::new(&config)?;
        let places = client
            .search_nearby(&NearbySearch::from(args))
            .await
            .context("Explore search failed")?;
        self.renderer.render(&ExplorePlaces(places).to_string())
    }

    pub async fn locate(&self, args: LocateArgs) -> Result<()> {
        let config = PlacesConfig {
            nominatim_url: args.nominatim_url,
            ..PlacesConfig::default()
        };
        let client = NominatimClient::new(&config)?;
        match client.reverse_geocode(args.lat, args.lon).await? {
            Some(context) => self.renderer.render(&context.to_string()),
            None => self.renderer.render(
                &OperationStatus::failure(format!("No address found at {},{}", args.lon, args.lat))
                    .to_string(),
            ),
        }
    }
}
