//! The live waypoint session.
//!
//! [`WaypointSession`] owns the ordered waypoint list being planned and the
//! route geometry derived from it. Every list change triggers one
//! recomputation through the injected [`GeoLookup`]; saving snapshots the
//! session into the injected [`RouteRepository`].
//!
//! Recomputations may overlap. Each one is tagged with the session revision
//! at the moment it was issued, and its response is applied only if the
//! revision is still current. Any list change or [`WaypointSession::reset`]
//! bumps the revision, so a slow response for an old list is dropped instead
//! of overwriting state derived from a newer one. A list change also drops
//! the geometry of the old list right away, so no snapshot or save ever
//! pairs a list with a line computed for another one.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use waymark_core::{OsrmClient, OsrmConfig, RouteStoreBuilder, WaypointSession};
//! use waymark_core::models::RouteProfile;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let lookup = Arc::new(OsrmClient::new(OsrmConfig::default())?);
//! let store = Arc::new(RouteStoreBuilder::new().build().await?);
//! let session = WaypointSession::new(lookup, store);
//!
//! session.add_from_point(4.35, 50.85).await;
//! session.add_from_point(4.36, 50.86).await;
//! println!("{}", session.snapshot().status);
//!
//! let saved = session
//!     .save_as_new_route("Morning Walk", RouteProfile::Walking)
//!     .await?;
//! println!("Saved {}", saved.id);
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use tokio::sync::watch;

use crate::{
    error::{Result, WaymarkError},
    lookup::GeoLookup,
    models::{
        ExplorePlace, LonLat, NewRoute, PlaceContext, RouteFeature, RouteFilter, RouteProfile,
        SavedRoute, Waypoint,
    },
    store::RouteRepository,
};

pub mod naming;

#[cfg(test)]
mod tests;

pub use naming::unique_route_name;

const ONE_MORE_STATUS: &str = "Add one more waypoint to create a route.";
const SNAPPING_STATUS: &str = "Snapping waypoint to road…";
const ADDING_SEARCHED_STATUS: &str = "Adding searched location…";
const RECALCULATING_STATUS: &str = "Recalculating route…";
const SAVE_PRECONDITION_STATUS: &str = "Add at least 2 waypoints before saving.";

/// Result of a session operation.
///
/// Lookup and store failures never escape as errors from the list
/// operations; they end up here and in the status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A route for the current list was computed and applied
    RouteReady,
    /// Fewer than two waypoints remain; the geometry was cleared
    Cleared,
    /// The request did not change anything
    Unchanged,
    /// A newer edit arrived first; this result was discarded
    Superseded,
    /// A lookup failed; the message is also the session status
    Failed { message: String },
}

impl SessionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::RouteReady | Self::Cleared | Self::Unchanged)
    }
}

/// Owned copy of the session state, as published to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub profile: RouteProfile,
    pub waypoints: Vec<Waypoint>,
    /// `None` while fewer than two waypoints exist, while the current list
    /// is still being routed, or when routing it failed
    pub route_geometry: Option<RouteFeature>,
    pub busy: bool,
    pub status: String,
}

#[derive(Debug)]
struct SessionState {
    waypoints: Vec<Waypoint>,
    geometry: Option<RouteFeature>,
    status: String,
    /// Bumped on every list change, reset and issued recomputation
    revision: u64,
    /// Bumped only by reset; snaps started before a reset are dropped
    epoch: u64,
    /// Operations currently awaiting a lookup or store call
    in_flight: usize,
}

impl SessionState {
    fn bump_revision(&mut self) {
        self.revision += 1;
    }

    /// The waypoint list changed; the old geometry no longer applies.
    fn list_changed(&mut self) {
        self.bump_revision();
        self.geometry = None;
    }
}

/// The in-progress route plan.
///
/// All methods take `&self`; the session can be shared between tasks and
/// overlapping calls are resolved through revision tagging.
pub struct WaypointSession {
    lookup: Arc<dyn GeoLookup>,
    store: Arc<dyn RouteRepository>,
    profile: RouteProfile,
    owner_uid: Option<String>,
    state: Mutex<SessionState>,
    updates: watch::Sender<SessionSnapshot>,
}

/// Keeps the busy flag raised until dropped.
struct BusyGuard<'a> {
    session: &'a WaypointSession,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.session.update(|state| {
            state.in_flight = state.in_flight.saturating_sub(1);
        });
    }
}

impl WaypointSession {
    /// Creates an empty walking session.
    pub fn new(lookup: Arc<dyn GeoLookup>, store: Arc<dyn RouteRepository>) -> Self {
        let profile = RouteProfile::default();
        let state = SessionState {
            waypoints: Vec::new(),
            geometry: None,
            status: initial_status(profile),
            revision: 0,
            epoch: 0,
            in_flight: 0,
        };
        let (updates, _) = watch::channel(snapshot_of(profile, &state));

        Self {
            lookup,
            store,
            profile,
            owner_uid: None,
            state: Mutex::new(state),
            updates,
        }
    }

    /// Sets the profile named in the prompt. Routing itself follows the
    /// lookup's own configuration.
    pub fn with_profile(mut self, profile: RouteProfile) -> Self {
        self.profile = profile;
        self.update(|state| state.status = initial_status(profile));
        self
    }

    /// Tags routes saved from this session with an owner.
    pub fn with_owner_uid(mut self, owner_uid: Option<String>) -> Self {
        self.owner_uid = owner_uid;
        self
    }

    pub fn profile(&self) -> RouteProfile {
        self.profile
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        snapshot_of(self.profile, &self.lock())
    }

    /// Receives a new snapshot after every applied state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.updates.subscribe()
    }

    /// Snaps a tapped point to the road and appends it.
    pub async fn add_from_point(&self, lon: f64, lat: f64) -> SessionOutcome {
        self.add_snapped(LonLat::new(lon, lat), None, None, SNAPPING_STATUS)
            .await
    }

    /// Snaps a picked search result to the road and appends it with its
    /// labels.
    pub async fn add_from_search_result(
        &self,
        lon: f64,
        lat: f64,
        region: Option<String>,
        country: Option<String>,
    ) -> SessionOutcome {
        self.add_snapped(LonLat::new(lon, lat), region, country, ADDING_SEARCHED_STATUS)
            .await
    }

    /// Appends a point of interest, labeled with the settlement and country
    /// from its reverse-geocoded context when available.
    pub async fn add_from_place(
        &self,
        place: &ExplorePlace,
        context: Option<&PlaceContext>,
    ) -> SessionOutcome {
        let region = context.and_then(PlaceContext::best_city);
        let country = context.and_then(|c| c.country.clone());
        self.add_from_search_result(place.lon, place.lat, region, country)
            .await
    }

    async fn add_snapped(
        &self,
        point: LonLat,
        region: Option<String>,
        country: Option<String>,
        working_status: &str,
    ) -> SessionOutcome {
        let _busy = self.busy();
        let epoch = self.update(|state| {
            state.status = working_status.to_string();
            state.epoch
        });

        let snapped = match self.lookup.snap_to_road(point).await {
            Ok(snapped) => snapped,
            Err(err) => {
                let message = status_text(&err);
                warn!("Snapping {},{} failed: {err}", point.lon, point.lat);
                return self.update(|state| {
                    if state.epoch != epoch {
                        return SessionOutcome::Superseded;
                    }
                    state.status = message.clone();
                    SessionOutcome::Failed { message }
                });
            }
        };

        let waypoint = Waypoint::new(snapped).with_labels(region, country);
        let added = self.update(|state| {
            if state.epoch != epoch {
                debug!("Dropping snapped point {},{}, session was reset", point.lon, point.lat);
                return false;
            }
            debug!("Adding waypoint {} at {},{}", waypoint.id, waypoint.lon, waypoint.lat);
            state.waypoints.push(waypoint);
            state.list_changed();
            true
        });

        if !added {
            return SessionOutcome::Superseded;
        }
        self.recompute().await
    }

    /// Moves the waypoint at `from` to `to`, keeping every other waypoint in
    /// relative order. Out-of-range indexes leave the list untouched and do
    /// not recompute.
    pub async fn move_waypoint(&self, from: usize, to: usize) -> SessionOutcome {
        let moved = self.update(|state| {
            let len = state.waypoints.len();
            if from >= len || to >= len {
                return false;
            }
            let waypoint = state.waypoints.remove(from);
            state.waypoints.insert(to, waypoint);
            state.list_changed();
            true
        });

        if !moved {
            return SessionOutcome::Unchanged;
        }
        self.recompute().await
    }

    /// Drops the waypoint at `index`. Out of range is a no-op.
    pub async fn remove_waypoint(&self, index: usize) -> SessionOutcome {
        let removed = self.update(|state| {
            if index >= state.waypoints.len() {
                return false;
            }
            state.waypoints.remove(index);
            state.list_changed();
            true
        });

        if !removed {
            return SessionOutcome::Unchanged;
        }
        self.recompute().await
    }

    /// Clears the waypoints and geometry. Any snap or recomputation still in
    /// flight is discarded when it completes.
    pub fn reset(&self) {
        let profile = self.profile;
        self.update(|state| {
            state.waypoints.clear();
            state.list_changed();
            state.epoch += 1;
            state.status = initial_status(profile);
        });
    }

    /// Recomputes the geometry for the current waypoint list.
    pub async fn recompute(&self) -> SessionOutcome {
        let profile = self.profile;
        let issued = self.update(|state| {
            state.bump_revision();
            match state.waypoints.len() {
                0 | 1 => {
                    state.geometry = None;
                    state.status = if state.waypoints.is_empty() {
                        initial_status(profile)
                    } else {
                        ONE_MORE_STATUS.to_string()
                    };
                    None
                }
                _ => {
                    state.status = RECALCULATING_STATUS.to_string();
                    let points: Vec<LonLat> =
                        state.waypoints.iter().map(Waypoint::position).collect();
                    Some((state.revision, points))
                }
            }
        });

        let Some((revision, points)) = issued else {
            return SessionOutcome::Cleared;
        };

        let _busy = self.busy();
        let result = self.lookup.build_route(&points).await;

        self.update(|state| {
            if state.revision != revision {
                debug!(
                    "Dropping route response for revision {revision}, session is at {}",
                    state.revision
                );
                return SessionOutcome::Superseded;
            }

            match result {
                Ok(Some(feature)) => {
                    state.geometry = Some(feature);
                    state.status = ready_status(state.waypoints.len());
                    SessionOutcome::RouteReady
                }
                Ok(None) => {
                    state.geometry = None;
                    state.status = ONE_MORE_STATUS.to_string();
                    SessionOutcome::Cleared
                }
                Err(err) => {
                    let message = status_text(&err);
                    warn!("Route recomputation failed: {err}");
                    state.geometry = None;
                    state.status = message.clone();
                    SessionOutcome::Failed { message }
                }
            }
        })
    }

    /// Saves the current waypoints and geometry as a new route with a unique
    /// name.
    ///
    /// Fails with a precondition error when there is no route to save. Store
    /// failures are reported in the status and returned; the live plan is
    /// kept either way.
    pub async fn save_as_new_route(&self, name: &str, profile: RouteProfile) -> Result<SavedRoute> {
        let current = {
            let state = self.lock();
            match &state.geometry {
                Some(geometry) if state.waypoints.len() >= 2 => {
                    Some((state.waypoints.clone(), geometry.clone()))
                }
                _ => None,
            }
        };

        let Some((waypoints, geometry)) = current else {
            self.update(|state| state.status = SAVE_PRECONDITION_STATUS.to_string());
            return Err(WaymarkError::precondition(SAVE_PRECONDITION_STATUS));
        };

        let _busy = self.busy();
        match self.persist_snapshot(name, profile, waypoints, geometry).await {
            Ok(route) => {
                info!("Saved route {} as '{}'", route.id, route.name);
                let status = format!("Saved as: {}", route.name);
                self.update(|state| state.status = status);
                Ok(route)
            }
            Err(err) => {
                warn!("Saving route failed: {err}");
                let status = format!("Save failed: {err}");
                self.update(|state| state.status = status);
                Err(err)
            }
        }
    }

    async fn persist_snapshot(
        &self,
        name: &str,
        profile: RouteProfile,
        waypoints: Vec<Waypoint>,
        geometry: RouteFeature,
    ) -> Result<SavedRoute> {
        let existing = self.store.list(&RouteFilter::default()).await?;
        let name = unique_route_name(name, existing.iter().map(|r| r.name.as_str()));

        let input = NewRoute::from_session(name, profile, waypoints, geometry)
            .with_owner(self.owner_uid.clone());
        let route = self.store.create(input);
        self.store.persist(&route).await?;
        Ok(route)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies a change under the lock, then publishes the new snapshot.
    fn update<R>(&self, change: impl FnOnce(&mut SessionState) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.lock();
            let result = change(&mut state);
            (result, snapshot_of(self.profile, &state))
        };
        self.updates.send_replace(snapshot);
        result
    }

    fn busy(&self) -> BusyGuard<'_> {
        self.update(|state| state.in_flight += 1);
        BusyGuard { session: self }
    }
}

impl std::fmt::Debug for WaypointSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaypointSession")
            .field("profile", &self.profile)
            .field("owner_uid", &self.owner_uid)
            .field("state", &*self.lock())
            .finish_non_exhaustive()
    }
}

fn snapshot_of(profile: RouteProfile, state: &SessionState) -> SessionSnapshot {
    SessionSnapshot {
        profile,
        waypoints: state.waypoints.clone(),
        route_geometry: state.geometry.clone(),
        busy: state.in_flight > 0,
        status: state.status.clone(),
    }
}

fn initial_status(profile: RouteProfile) -> String {
    format!("Tap on the map to add {profile} waypoints.")
}

fn ready_status(count: usize) -> String {
    format!("Waypoints: {count} • Route ready")
}

/// Lookup errors show the service's own message; anything else its full
/// description.
fn status_text(err: &WaymarkError) -> String {
    match err {
        WaymarkError::Lookup { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
