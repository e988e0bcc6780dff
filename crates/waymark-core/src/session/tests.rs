//! Tests for the session module.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::*;
use crate::models::Position;

/// A lookup reply that is either ready or released by the test through a
/// oneshot channel.
enum Reply<T> {
    Now(Result<T>),
    Gated(oneshot::Receiver<Result<T>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T> {
        match self {
            Reply::Now(reply) => reply,
            Reply::Gated(rx) => rx
                .await
                .unwrap_or_else(|_| Err(WaymarkError::lookup("gate dropped"))),
        }
    }
}

/// Scripted routing service.
///
/// Snapping nudges points by a fixed offset unless a reply is queued. Routes
/// are a straight line through the points unless a reply is queued.
#[derive(Default)]
struct FakeLookup {
    snaps: Mutex<VecDeque<Reply<LonLat>>>,
    routes: Mutex<VecDeque<Reply<Option<RouteFeature>>>>,
    route_calls: AtomicUsize,
}

impl FakeLookup {
    fn queue_snap(&self, reply: Result<LonLat>) {
        self.snaps.lock().unwrap().push_back(Reply::Now(reply));
    }

    fn gate_snap(&self) -> oneshot::Sender<Result<LonLat>> {
        let (tx, rx) = oneshot::channel();
        self.snaps.lock().unwrap().push_back(Reply::Gated(rx));
        tx
    }

    fn queue_route(&self, reply: Result<Option<RouteFeature>>) {
        self.routes.lock().unwrap().push_back(Reply::Now(reply));
    }

    fn gate_route(&self) -> oneshot::Sender<Result<Option<RouteFeature>>> {
        let (tx, rx) = oneshot::channel();
        self.routes.lock().unwrap().push_back(Reply::Gated(rx));
        tx
    }

    fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }
}

fn straight_line(points: &[LonLat]) -> RouteFeature {
    RouteFeature::new(points.iter().map(|p| Position::from(*p)).collect())
}

#[async_trait]
impl GeoLookup for FakeLookup {
    async fn snap_to_road(&self, point: LonLat) -> Result<LonLat> {
        let queued = self.snaps.lock().unwrap().pop_front();
        match queued {
            Some(reply) => reply.resolve().await,
            None => Ok(LonLat::new(point.lon + 0.0001, point.lat + 0.0003)),
        }
    }

    async fn build_route(&self, points: &[LonLat]) -> Result<Option<RouteFeature>> {
        if points.len() < 2 {
            return Ok(None);
        }
        self.route_calls.fetch_add(1, Ordering::SeqCst);
        let queued = self.routes.lock().unwrap().pop_front();
        match queued {
            Some(reply) => reply.resolve().await,
            None => Ok(Some(straight_line(points))),
        }
    }
}

/// In-memory store with an optional write failure.
#[derive(Default)]
struct MemoryStore {
    routes: Mutex<Vec<SavedRoute>>,
    fail_writes: bool,
}

impl MemoryStore {
    fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    fn find(&self, id: &str) -> Result<SavedRoute> {
        self.routes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| WaymarkError::RouteNotFound { id: id.to_string() })
    }

    fn modify(&self, id: &str, change: impl FnOnce(&mut SavedRoute)) -> Result<SavedRoute> {
        let mut routes = self.routes.lock().unwrap();
        let route = routes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| WaymarkError::RouteNotFound { id: id.to_string() })?;
        change(route);
        Ok(route.clone())
    }
}

#[async_trait]
impl RouteRepository for MemoryStore {
    async fn persist(&self, route: &SavedRoute) -> Result<()> {
        if self.fail_writes {
            return Err(WaymarkError::database("disk full")
                .with_source(rusqlite::Error::QueryReturnedNoRows));
        }
        let mut routes = self.routes.lock().unwrap();
        routes.retain(|r| r.id != route.id);
        routes.push(route.clone());
        Ok(())
    }

    async fn list(&self, filter: &RouteFilter) -> Result<Vec<SavedRoute>> {
        let routes = self.routes.lock().unwrap();
        Ok(routes
            .iter()
            .rev()
            .filter(|r| filter.include_deleted || !r.is_deleted())
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<SavedRoute>> {
        Ok(self.find(id).ok())
    }

    async fn rename(&self, id: &str, name: &str) -> Result<SavedRoute> {
        self.modify(id, |r| r.name = name.to_string())
    }

    async fn soft_delete(&self, id: &str) -> Result<SavedRoute> {
        self.modify(id, |r| r.deleted_at = Some(jiff::Timestamp::now()))
    }

    async fn hard_delete(&self, id: &str) -> Result<()> {
        self.find(id)?;
        self.routes.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    async fn list_dirty(&self, _owner_uid: Option<&str>) -> Result<Vec<SavedRoute>> {
        Ok(self
            .routes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.dirty)
            .cloned()
            .collect())
    }

    async fn mark_synced(&self, id: &str) -> Result<SavedRoute> {
        self.modify(id, |r| r.dirty = false)
    }
}

fn create_test_session() -> (Arc<FakeLookup>, Arc<MemoryStore>, WaypointSession) {
    let lookup = Arc::new(FakeLookup::default());
    let store = Arc::new(MemoryStore::default());
    let session = WaypointSession::new(lookup.clone(), store.clone());
    (lookup, store, session)
}

async fn session_with_points(points: &[(f64, f64)]) -> (Arc<FakeLookup>, Arc<MemoryStore>, WaypointSession) {
    let (lookup, store, session) = create_test_session();
    for (lon, lat) in points {
        session.add_from_point(*lon, *lat).await;
    }
    (lookup, store, session)
}

fn ids(session: &WaypointSession) -> Vec<String> {
    session.snapshot().waypoints.into_iter().map(|w| w.id).collect()
}

#[tokio::test]
async fn test_new_session_prompts_for_waypoints() {
    let (_lookup, _store, session) = create_test_session();
    let snapshot = session.snapshot();

    assert!(snapshot.waypoints.is_empty());
    assert!(snapshot.route_geometry.is_none());
    assert!(!snapshot.busy);
    assert_eq!(snapshot.status, "Tap on the map to add walking waypoints.");
}

#[tokio::test]
async fn test_profile_changes_prompt() {
    let lookup = Arc::new(FakeLookup::default());
    let store = Arc::new(MemoryStore::default());
    let session = WaypointSession::new(lookup, store).with_profile(RouteProfile::Cycling);

    assert_eq!(session.snapshot().status, "Tap on the map to add cycling waypoints.");
}

#[tokio::test]
async fn test_end_to_end_add_and_save() {
    let (lookup, store, session) = create_test_session();
    lookup.queue_snap(Ok(LonLat::new(4.3501, 50.8503)));
    lookup.queue_snap(Ok(LonLat::new(4.3601, 50.8603)));
    lookup.queue_route(Ok(Some(RouteFeature::new(vec![
        [4.3501, 50.8503],
        [4.3601, 50.8603],
    ]))));

    let outcome = session.add_from_point(4.35, 50.85).await;
    assert_eq!(outcome, SessionOutcome::Cleared);
    let snapshot = session.snapshot();
    assert!(snapshot.route_geometry.is_none());
    assert_eq!(snapshot.status, "Add one more waypoint to create a route.");
    assert_eq!(snapshot.waypoints[0].position(), LonLat::new(4.3501, 50.8503));

    let outcome = session.add_from_point(4.36, 50.86).await;
    assert_eq!(outcome, SessionOutcome::RouteReady);
    let snapshot = session.snapshot();
    assert!(snapshot.route_geometry.is_some());
    assert!(snapshot.status.contains('2'));
    assert_eq!(snapshot.status, "Waypoints: 2 • Route ready");
    assert!(!snapshot.busy);

    let saved = session
        .save_as_new_route("Morning Walk", RouteProfile::Walking)
        .await
        .expect("Failed to save");
    assert_eq!(saved.name, "Morning Walk");
    assert_eq!(saved.waypoints.len(), 2);
    assert!(saved.dirty);
    assert_eq!(session.snapshot().status, "Saved as: Morning Walk");

    let stored = store.list(&RouteFilter::default()).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Morning Walk");
    assert_eq!(stored[0].waypoints, snapshot.waypoints);
}

#[tokio::test]
async fn test_geometry_cleared_below_two_waypoints() {
    let (_lookup, _store, session) =
        session_with_points(&[(4.35, 50.85), (4.36, 50.86), (4.37, 50.87)]).await;
    assert!(session.snapshot().route_geometry.is_some());

    assert_eq!(session.remove_waypoint(0).await, SessionOutcome::RouteReady);
    assert_eq!(session.remove_waypoint(0).await, SessionOutcome::Cleared);
    let snapshot = session.snapshot();
    assert!(snapshot.route_geometry.is_none());
    assert_eq!(snapshot.status, "Add one more waypoint to create a route.");

    assert_eq!(session.remove_waypoint(0).await, SessionOutcome::Cleared);
    let snapshot = session.snapshot();
    assert!(snapshot.route_geometry.is_none());
    assert_eq!(snapshot.status, "Tap on the map to add walking waypoints.");
}

#[tokio::test]
async fn test_stale_route_response_is_dropped() {
    let (lookup, _store, session) =
        session_with_points(&[(4.35, 50.85), (4.36, 50.86), (4.37, 50.87)]).await;
    let older = lookup.gate_route();
    let newer = lookup.gate_route();
    let mut updates = session.subscribe();

    let old_line = RouteFeature::new(vec![[0.0, 0.0], [1.0, 1.0]]);
    let new_line = RouteFeature::new(vec![[4.0, 50.0], [4.1, 50.1]]);

    let (first, second, ()) = tokio::join!(
        session.recompute(),
        session.remove_waypoint(2),
        async {
            newer.send(Ok(Some(new_line.clone()))).unwrap();
            updates
                .wait_for(|s| s.status == "Waypoints: 2 • Route ready")
                .await
                .unwrap();
            older.send(Ok(Some(old_line.clone()))).unwrap();
        }
    );

    assert_eq!(first, SessionOutcome::Superseded);
    assert_eq!(second, SessionOutcome::RouteReady);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.route_geometry, Some(new_line));
    assert_eq!(snapshot.status, "Waypoints: 2 • Route ready");
    assert!(!snapshot.busy);
}

#[tokio::test]
async fn test_stale_failure_does_not_overwrite_status() {
    let (lookup, _store, session) = session_with_points(&[(4.35, 50.85), (4.36, 50.86)]).await;
    let older = lookup.gate_route();
    let mut updates = session.subscribe();

    let (first, second) = tokio::join!(session.recompute(), async {
        updates.wait_for(|s| s.busy).await.unwrap();
        let outcome = session.move_waypoint(1, 0).await;
        older
            .send(Err(WaymarkError::lookup("OSRM route failed (500)")))
            .unwrap();
        outcome
    });

    assert_eq!(first, SessionOutcome::Superseded);
    assert_eq!(second, SessionOutcome::RouteReady);
    let snapshot = session.snapshot();
    assert!(snapshot.route_geometry.is_some());
    assert_eq!(snapshot.status, "Waypoints: 2 • Route ready");
}

#[tokio::test]
async fn test_reset_discards_in_flight_recompute() {
    let (lookup, _store, session) = session_with_points(&[(4.35, 50.85), (4.36, 50.86)]).await;
    let gate = lookup.gate_route();
    let mut updates = session.subscribe();

    let (outcome, ()) = tokio::join!(session.recompute(), async {
        updates.wait_for(|s| s.busy).await.unwrap();
        session.reset();
        gate.send(Ok(Some(RouteFeature::new(vec![[0.0, 0.0], [1.0, 1.0]]))))
            .unwrap();
    });

    assert_eq!(outcome, SessionOutcome::Superseded);
    let snapshot = session.snapshot();
    assert!(snapshot.waypoints.is_empty());
    assert!(snapshot.route_geometry.is_none());
    assert_eq!(snapshot.status, "Tap on the map to add walking waypoints.");
}

#[tokio::test]
async fn test_list_change_hides_old_geometry_until_routed() {
    let (lookup, store, session) = session_with_points(&[(4.35, 50.85), (4.36, 50.86)]).await;
    assert!(session.snapshot().route_geometry.is_some());
    let gate = lookup.gate_route();
    let mut updates = session.subscribe();

    let (outcome, ()) = tokio::join!(session.add_from_point(4.37, 50.87), async {
        let pending = updates
            .wait_for(|s| s.status == "Recalculating route…")
            .await
            .unwrap()
            .clone();
        assert_eq!(pending.waypoints.len(), 3);
        assert!(pending.route_geometry.is_none());

        let err = session
            .save_as_new_route("Mid", RouteProfile::Walking)
            .await
            .unwrap_err();
        assert!(matches!(err, WaymarkError::Precondition { .. }));

        gate.send(Err(WaymarkError::lookup("OSRM route failed (500)")))
            .unwrap();
    });

    assert!(matches!(outcome, SessionOutcome::Failed { .. }));
    assert!(session.snapshot().route_geometry.is_none());
    assert!(store.routes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_move_and_remove_clear_geometry_while_pending() {
    let (lookup, _store, session) =
        session_with_points(&[(4.35, 50.85), (4.36, 50.86), (4.37, 50.87)]).await;
    let move_gate = lookup.gate_route();
    let remove_gate = lookup.gate_route();
    let mut updates = session.subscribe();

    let (moved, removed, ()) = tokio::join!(
        session.move_waypoint(0, 2),
        session.remove_waypoint(0),
        async {
            let pending = updates.wait_for(|s| s.busy).await.unwrap().clone();
            assert!(pending.route_geometry.is_none());
            move_gate.send(Ok(Some(straight_line(&[])))).unwrap();
            remove_gate
                .send(Ok(Some(RouteFeature::new(vec![[4.0, 50.0], [4.1, 50.1]]))))
                .unwrap();
        }
    );

    assert_eq!(moved, SessionOutcome::Superseded);
    assert_eq!(removed, SessionOutcome::RouteReady);
    assert_eq!(session.snapshot().waypoints.len(), 2);
}

#[tokio::test]
async fn test_reset_drops_pending_snap() {
    let (lookup, _store, session) = session_with_points(&[(4.35, 50.85)]).await;
    let gate = lookup.gate_snap();
    let mut updates = session.subscribe();

    let (outcome, ()) = tokio::join!(session.add_from_point(4.36, 50.86), async {
        updates.wait_for(|s| s.busy).await.unwrap();
        session.reset();
        gate.send(Ok(LonLat::new(4.3601, 50.8603))).unwrap();
    });

    assert_eq!(outcome, SessionOutcome::Superseded);
    let snapshot = session.snapshot();
    assert!(snapshot.waypoints.is_empty());
    assert!(!snapshot.busy);
    assert_eq!(snapshot.status, "Tap on the map to add walking waypoints.");
}

#[tokio::test]
async fn test_failed_snap_after_reset_keeps_prompt() {
    let (lookup, _store, session) = create_test_session();
    let gate = lookup.gate_snap();
    let mut updates = session.subscribe();

    let (outcome, ()) = tokio::join!(session.add_from_point(4.36, 50.86), async {
        updates.wait_for(|s| s.busy).await.unwrap();
        session.reset();
        gate.send(Err(WaymarkError::lookup("OSRM nearest: no waypoint found")))
            .unwrap();
    });

    assert_eq!(outcome, SessionOutcome::Superseded);
    assert_eq!(
        session.snapshot().status,
        "Tap on the map to add walking waypoints."
    );
}

#[tokio::test]
async fn test_overlapping_taps_are_all_kept() {
    let (lookup, _store, session) = create_test_session();
    let first = lookup.gate_snap();
    let second = lookup.gate_snap();

    let (_, _, ()) = tokio::join!(
        session.add_from_point(4.35, 50.85),
        session.add_from_point(4.36, 50.86),
        async {
            second.send(Ok(LonLat::new(4.3601, 50.8603))).unwrap();
            first.send(Ok(LonLat::new(4.3501, 50.8503))).unwrap();
        }
    );

    let snapshot = session.snapshot();
    assert_eq!(snapshot.waypoints.len(), 2);
    assert!(snapshot.route_geometry.is_some());
    assert_eq!(snapshot.status, "Waypoints: 2 • Route ready");
}

#[tokio::test]
async fn test_busy_while_waiting_for_lookup() {
    let (lookup, _store, session) = session_with_points(&[(4.35, 50.85), (4.36, 50.86)]).await;
    let gate = lookup.gate_route();
    let mut updates = session.subscribe();

    let (outcome, ()) = tokio::join!(session.recompute(), async {
        let busy = updates.wait_for(|s| s.busy).await.unwrap().clone();
        assert_eq!(busy.status, "Recalculating route…");
        gate.send(Err(WaymarkError::lookup("OSRM route failed (502)")))
            .unwrap();
    });

    assert_eq!(
        outcome,
        SessionOutcome::Failed {
            message: "OSRM route failed (502)".to_string()
        }
    );
    let snapshot = session.snapshot();
    assert!(!snapshot.busy);
    assert!(snapshot.route_geometry.is_none());
    assert_eq!(snapshot.status, "OSRM route failed (502)");
}

#[tokio::test]
async fn test_move_out_of_range_is_noop() {
    let (lookup, _store, session) =
        session_with_points(&[(4.35, 50.85), (4.36, 50.86), (4.37, 50.87)]).await;
    let before = session.snapshot();
    let calls = lookup.route_calls();

    assert_eq!(session.move_waypoint(0, 3).await, SessionOutcome::Unchanged);
    assert_eq!(session.move_waypoint(5, 0).await, SessionOutcome::Unchanged);

    assert_eq!(session.snapshot(), before);
    assert_eq!(lookup.route_calls(), calls);
}

#[tokio::test]
async fn test_move_preserves_relative_order() {
    let (lookup, _store, session) = session_with_points(&[
        (4.35, 50.85),
        (4.36, 50.86),
        (4.37, 50.87),
        (4.38, 50.88),
    ])
    .await;
    let original = ids(&session);
    let calls = lookup.route_calls();

    assert_eq!(session.move_waypoint(0, 2).await, SessionOutcome::RouteReady);
    assert_eq!(
        ids(&session),
        vec![
            original[1].clone(),
            original[2].clone(),
            original[0].clone(),
            original[3].clone()
        ]
    );

    assert_eq!(session.move_waypoint(3, 0).await, SessionOutcome::RouteReady);
    assert_eq!(
        ids(&session),
        vec![
            original[3].clone(),
            original[1].clone(),
            original[2].clone(),
            original[0].clone()
        ]
    );
    assert_eq!(lookup.route_calls(), calls + 2);

    // The geometry follows the new order
    let snapshot = session.snapshot();
    let first = snapshot.route_geometry.unwrap().coordinates()[0];
    assert_eq!(LonLat::from(first), snapshot.waypoints[0].position());
}

#[tokio::test]
async fn test_repeated_remove_shifts() {
    let (_lookup, _store, session) =
        session_with_points(&[(4.35, 50.85), (4.36, 50.86), (4.37, 50.87)]).await;
    let original = ids(&session);

    session.remove_waypoint(0).await;
    session.remove_waypoint(0).await;

    assert_eq!(ids(&session), vec![original[2].clone()]);
}

#[tokio::test]
async fn test_remove_out_of_range_is_noop() {
    let (lookup, _store, session) = session_with_points(&[(4.35, 50.85), (4.36, 50.86)]).await;
    let calls = lookup.route_calls();

    assert_eq!(session.remove_waypoint(2).await, SessionOutcome::Unchanged);
    assert_eq!(session.snapshot().waypoints.len(), 2);
    assert_eq!(lookup.route_calls(), calls);
}

#[tokio::test]
async fn test_failed_snap_keeps_list() {
    let (lookup, _store, session) = session_with_points(&[(4.35, 50.85), (4.36, 50.86)]).await;
    let before = session.snapshot();
    lookup.queue_snap(Err(WaymarkError::lookup("OSRM nearest: no waypoint found")));

    let outcome = session.add_from_point(4.37, 50.87).await;

    assert_eq!(
        outcome,
        SessionOutcome::Failed {
            message: "OSRM nearest: no waypoint found".to_string()
        }
    );
    let snapshot = session.snapshot();
    assert_eq!(snapshot.waypoints, before.waypoints);
    assert_eq!(snapshot.route_geometry, before.route_geometry);
    assert_eq!(snapshot.status, "OSRM nearest: no waypoint found");
    assert!(!snapshot.busy);
}

#[tokio::test]
async fn test_search_result_keeps_labels_and_snaps() {
    let (lookup, _store, session) = create_test_session();
    lookup.queue_snap(Ok(LonLat::new(4.3525, 50.8468)));

    session
        .add_from_search_result(
            4.3522,
            50.8467,
            Some("Brussels".to_string()),
            Some("Belgium".to_string()),
        )
        .await;

    let waypoint = &session.snapshot().waypoints[0];
    assert_eq!(waypoint.position(), LonLat::new(4.3525, 50.8468));
    assert_eq!(waypoint.region.as_deref(), Some("Brussels"));
    assert_eq!(waypoint.country.as_deref(), Some("Belgium"));
}

#[tokio::test]
async fn test_place_labels_come_from_context() {
    let (_lookup, _store, session) = create_test_session();
    let place = ExplorePlace {
        id: "node/1".to_string(),
        name: "Manneken Pis".to_string(),
        lon: 4.3499,
        lat: 50.845,
        category: crate::models::ExploreCategory::Sights,
        tags: Default::default(),
        distance_meters: None,
    };
    let context = PlaceContext {
        town: Some("Brussels".to_string()),
        country: Some("Belgium".to_string()),
        ..Default::default()
    };

    session.add_from_place(&place, Some(&context)).await;
    session.add_from_place(&place, None).await;

    let waypoints = session.snapshot().waypoints;
    assert_eq!(waypoints[0].region.as_deref(), Some("Brussels"));
    assert_eq!(waypoints[0].country.as_deref(), Some("Belgium"));
    assert!(waypoints[1].region.is_none());
}

#[tokio::test]
async fn test_save_requires_route() {
    let (_lookup, store, session) = session_with_points(&[(4.35, 50.85)]).await;

    let err = session
        .save_as_new_route("Too short", RouteProfile::Walking)
        .await
        .unwrap_err();

    assert!(matches!(err, WaymarkError::Precondition { .. }));
    assert_eq!(session.snapshot().status, "Add at least 2 waypoints before saving.");
    assert!(store.routes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_save_requires_geometry() {
    let (lookup, store, session) = session_with_points(&[(4.35, 50.85)]).await;
    lookup.queue_route(Err(WaymarkError::lookup("OSRM route: no geometry returned")));
    session.add_from_point(4.36, 50.86).await;
    assert!(session.snapshot().route_geometry.is_none());

    let err = session
        .save_as_new_route("No line", RouteProfile::Walking)
        .await
        .unwrap_err();

    assert!(matches!(err, WaymarkError::Precondition { .. }));
    assert!(store.routes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_repeated_saves_get_suffixes() {
    let (_lookup, store, session) = session_with_points(&[(4.35, 50.85), (4.36, 50.86)]).await;

    let mut names = Vec::new();
    for _ in 0..3 {
        let saved = session
            .save_as_new_route("Route", RouteProfile::Walking)
            .await
            .expect("Failed to save");
        names.push(saved.name);
    }

    assert_eq!(names, vec!["Route", "Route (2)", "Route (3)"]);
    assert_eq!(store.routes.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_deleted_routes_do_not_reserve_names() {
    let (_lookup, store, session) = session_with_points(&[(4.35, 50.85), (4.36, 50.86)]).await;

    let first = session
        .save_as_new_route("Loop", RouteProfile::Walking)
        .await
        .unwrap();
    store.soft_delete(&first.id).await.unwrap();

    let second = session
        .save_as_new_route("loop", RouteProfile::Walking)
        .await
        .unwrap();
    assert_eq!(second.name, "loop");
}

#[tokio::test]
async fn test_saved_snapshot_is_independent() {
    let (_lookup, store, session) = session_with_points(&[(4.35, 50.85), (4.36, 50.86)]).await;

    let saved = session
        .save_as_new_route("Snapshot", RouteProfile::Walking)
        .await
        .unwrap();
    session.reset();

    let stored = store.get(&saved.id).await.unwrap().unwrap();
    assert_eq!(stored.waypoints.len(), 2);
    assert_eq!(stored.route_feature.len(), 2);
}

#[tokio::test]
async fn test_save_stamps_owner_and_metrics() {
    let lookup = Arc::new(FakeLookup::default());
    let store = Arc::new(MemoryStore::default());
    let session = WaypointSession::new(lookup.clone(), store.clone())
        .with_owner_uid(Some("user-1".to_string()));
    session.add_from_point(4.35, 50.85).await;
    lookup.queue_route(Ok(Some(
        RouteFeature::new(vec![[4.35, 50.85], [4.36, 50.86]]).with_metrics(Some(1523.7), Some(1096.2)),
    )));
    session.add_from_point(4.36, 50.86).await;

    let saved = session
        .save_as_new_route("Measured", RouteProfile::Walking)
        .await
        .unwrap();

    assert_eq!(saved.owner_uid.as_deref(), Some("user-1"));
    assert_eq!(saved.distance_meters, Some(1524));
    assert_eq!(saved.duration_seconds, Some(1096));
}

#[tokio::test]
async fn test_store_failure_keeps_plan() {
    let lookup = Arc::new(FakeLookup::default());
    let store = Arc::new(MemoryStore::failing());
    let session = WaypointSession::new(lookup, store);
    session.add_from_point(4.35, 50.85).await;
    session.add_from_point(4.36, 50.86).await;
    let before = session.snapshot();

    let err = session
        .save_as_new_route("Doomed", RouteProfile::Walking)
        .await
        .unwrap_err();

    assert!(err.is_store_error());
    let snapshot = session.snapshot();
    assert!(snapshot.status.starts_with("Save failed: "));
    assert_eq!(snapshot.waypoints, before.waypoints);
    assert_eq!(snapshot.route_geometry, before.route_geometry);
    assert!(!snapshot.busy);
}
