#![allow(dead_code)]

use serde_json::{json, Value};
use tempfile::TempDir;
use waymark_core::{RouteStore, RouteStoreBuilder};

/// Helper function to create a store in a fresh temporary directory
pub async fn create_test_store() -> (TempDir, RouteStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = RouteStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

pub fn nearest_body(lon: f64, lat: f64) -> Value {
    json!({
        "code": "Ok",
        "waypoints": [{ "name": "Rue Neuve", "location": [lon, lat], "distance": 4.2 }]
    })
}

pub fn route_body(coordinates: Value, distance: f64, duration: f64) -> Value {
    json!({
        "code": "Ok",
        "routes": [{
            "geometry": { "type": "LineString", "coordinates": coordinates },
            "distance": distance,
            "duration": duration
        }],
        "waypoints": []
    })
}
