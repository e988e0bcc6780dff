#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;
    use serde_json::json;

    use crate::models::{
        LonLat, NewRoute, PlaceContext, RouteFeature, RouteFilter, RouteProfile, SavedRoute,
        Waypoint,
    };

    fn create_test_waypoint(id: &str, lon: f64, lat: f64) -> Waypoint {
        Waypoint {
            id: id.to_string(),
            lon,
            lat,
            region: None,
            country: None,
        }
    }

    fn create_test_feature() -> RouteFeature {
        RouteFeature::new(vec![[4.3501, 50.8503], [4.355, 50.855], [4.3601, 50.8603]])
            .with_metrics(Some(1523.7), Some(1096.2))
    }

    #[test]
    fn test_lonlat_parse() {
        let p: LonLat = "4.35, 50.85".parse().expect("Failed to parse coordinate");
        assert_eq!(p, LonLat::new(4.35, 50.85));

        assert!("4.35".parse::<LonLat>().is_err());
        assert!("abc,50".parse::<LonLat>().is_err());
        assert!("200,50".parse::<LonLat>().is_err());
        assert!("4.35,95".parse::<LonLat>().is_err());
    }

    #[test]
    fn test_waypoint_ids_are_unique() {
        let a = Waypoint::new(LonLat::new(4.35, 50.85));
        let b = Waypoint::new(LonLat::new(4.35, 50.85));
        assert_ne!(a.id, b.id);
        assert_eq!(a.position(), b.position());
    }

    #[test]
    fn test_waypoint_json_omits_missing_labels() {
        let wp = create_test_waypoint("a", 4.35, 50.85);
        let value = serde_json::to_value(&wp).expect("Failed to serialize waypoint");
        assert_eq!(value, json!({ "id": "a", "lon": 4.35, "lat": 50.85 }));

        let labeled = wp.with_labels(Some("Brussels".into()), Some("Belgium".into()));
        let value = serde_json::to_value(&labeled).expect("Failed to serialize waypoint");
        assert_eq!(value["region"], "Brussels");
        assert_eq!(value["country"], "Belgium");
    }

    #[test]
    fn test_route_feature_geojson_shape() {
        let feature = RouteFeature::new(vec![[4.35, 50.85], [4.36, 50.86]]);
        let value = serde_json::to_value(&feature).expect("Failed to serialize feature");
        assert_eq!(
            value,
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[4.35, 50.85], [4.36, 50.86]]
                },
                "properties": {}
            })
        );
    }

    #[test]
    fn test_route_feature_rejects_other_geometry() {
        let point = json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [4.35, 50.85] },
            "properties": {}
        });
        assert!(serde_json::from_value::<RouteFeature>(point).is_err());

        let collection = json!({ "type": "FeatureCollection", "features": [] });
        assert!(serde_json::from_value::<RouteFeature>(collection).is_err());
    }

    #[test]
    fn test_route_feature_properties_default_when_missing() {
        let value = json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]] }
        });
        let feature: RouteFeature =
            serde_json::from_value(value).expect("Failed to deserialize feature");
        assert!(feature.properties.is_empty());
        assert_eq!(feature.len(), 2);
    }

    #[test]
    fn test_route_feature_metrics() {
        let feature = create_test_feature();
        assert_eq!(feature.distance_meters(), Some(1523.7));
        assert_eq!(feature.duration_seconds(), Some(1096.2));

        let bare = RouteFeature::new(vec![[0.0, 0.0]]).with_metrics(None, Some(f64::NAN));
        assert_eq!(bare.distance_meters(), None);
        assert_eq!(bare.duration_seconds(), None);
    }

    #[test]
    fn test_route_feature_bounds() {
        let feature = RouteFeature::new(vec![[4.36, 50.85], [4.35, 50.87], [4.40, 50.86]]);
        let bounds = feature.bounds().expect("Bounds should exist");
        assert_eq!(bounds.min_lon, 4.35);
        assert_eq!(bounds.max_lon, 4.40);
        assert_eq!(bounds.min_lat, 50.85);
        assert_eq!(bounds.max_lat, 50.87);

        assert!(RouteFeature::new(vec![]).bounds().is_none());
    }

    #[test]
    fn test_route_profile_round_trip_strings() {
        for profile in [
            RouteProfile::Walking,
            RouteProfile::Driving,
            RouteProfile::Cycling,
        ] {
            assert_eq!(profile.as_str().parse::<RouteProfile>(), Ok(profile));
        }
        assert_eq!(RouteProfile::default(), RouteProfile::Walking);
        assert!("flying".parse::<RouteProfile>().is_err());
    }

    #[test]
    fn test_saved_route_create_defaults() {
        let input = NewRoute::from_session(
            "Morning Walk".to_string(),
            RouteProfile::Walking,
            vec![
                create_test_waypoint("a", 4.35, 50.85),
                create_test_waypoint("b", 4.36, 50.86),
            ],
            create_test_feature(),
        );
        let before = Timestamp::now();
        let route = SavedRoute::create(input);

        assert!(route.id.starts_with("route_"));
        assert_eq!(route.name, "Morning Walk");
        assert!(route.dirty);
        assert!(!route.is_deleted());
        assert!(route.last_synced_at.is_none());
        assert!(route.owner_uid.is_none());
        assert_eq!(route.created_at, route.updated_at);
        assert!(route.created_at >= before);
        assert_eq!(route.distance_meters, Some(1524));
        assert_eq!(route.duration_seconds, Some(1096));
    }

    #[test]
    fn test_saved_route_ids_differ() {
        let make = || {
            SavedRoute::create(NewRoute::from_session(
                "Route".to_string(),
                RouteProfile::Walking,
                vec![],
                create_test_feature(),
            ))
        };
        assert_ne!(make().id, make().id);
    }

    #[test]
    fn test_saved_route_serializes_camel_case() {
        let route = SavedRoute::create(
            NewRoute::from_session(
                "Route".to_string(),
                RouteProfile::Cycling,
                vec![],
                create_test_feature(),
            )
            .with_owner(Some("user-1".to_string())),
        );
        let value = serde_json::to_value(&route).expect("Failed to serialize route");
        assert_eq!(value["profile"], "cycling");
        assert_eq!(value["ownerUid"], "user-1");
        assert!(value.get("routeFeature").is_some());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_place_context_best_city() {
        let ctx = PlaceContext {
            town: Some("  ".to_string()),
            village: Some("Tervuren".to_string()),
            state: Some("Flanders".to_string()),
            ..Default::default()
        };
        assert_eq!(ctx.best_city(), Some("Tervuren".to_string()));
        assert_eq!(PlaceContext::default().best_city(), None);
    }

    #[test]
    fn test_route_filter_builders() {
        assert_eq!(
            RouteFilter::default(),
            RouteFilter {
                include_deleted: false,
                owner_uid: None
            }
        );
        let filter = RouteFilter::with_deleted().owned_by("u1");
        assert!(filter.include_deleted);
        assert_eq!(filter.owner_uid.as_deref(), Some("u1"));
    }
}
