//! Scene assembly from configuration, without any runtime

use marker_glide::{constants::END_COORDS, prelude::*, MapError};

#[test]
fn test_partial_json_keeps_defaults() {
    let config = SceneConfig::from_json_str(
        r#"{ "animation": { "speed_kmph": 500.0 }, "map": { "zoom": 12 } }"#,
    )
    .unwrap();

    assert_eq!(config.animation.speed_kmph, 500.0);
    assert_eq!(config.animation.refresh_interval_ms, 50);
    assert_eq!(config.animation.start, LatLng::new(22.1696, 91.4996));
    assert_eq!(config.map.zoom, 12.0);
    assert_eq!(config.map.start_popup, "<b>A</b>");
}

#[test]
fn test_bad_json_is_reported() {
    assert!(matches!(
        SceneConfig::from_json_str("{ not json"),
        Err(MapError::Serialization(_))
    ));
    assert!(matches!(
        SceneConfig::from_json_str(r#"{ "animation": { "refresh_interval_ms": 0 } }"#),
        Err(MapError::InvalidConfig(_))
    ));
    assert!(matches!(
        SceneConfig::from_json_str(r#"{ "animation": { "end": { "lat": 95.0, "lng": 0.0 } } }"#),
        Err(MapError::InvalidCoordinates(_))
    ));
}

#[test]
fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!("glide-scene-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "animation": { "distance": "geodesic" } }"#).unwrap();

    let config = SceneConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.animation.distance, DistanceFormula::Geodesic);

    assert!(matches!(
        SceneConfig::from_path(&path),
        Err(MapError::Io(_))
    ));
}

#[test]
fn test_scene_from_config() {
    let config = SceneConfig::from_json_str(
        r#"{ "animation": { "start": { "lat": 10.0, "lng": 20.0 }, "end": { "lat": 10.5, "lng": 20.5 } } }"#,
    )
    .unwrap();
    let builder = SceneBuilder::from_config(config);
    let map = builder.build().unwrap();

    assert_eq!(map.viewport().center, LatLng::new(10.0, 20.0));
    assert_eq!(map.marker(END_MARKER_ID).unwrap().lat_lng(), LatLng::new(10.5, 20.5));
    assert_eq!(
        map.marker(MOVING_MARKER_ID).unwrap().lat_lng(),
        LatLng::new(10.0, 20.0)
    );

    let info = InfoPanel::from_config(builder.animation_config());
    assert_eq!(info.lines()[0], "Start Coordinates: [10, 20]");
}

#[test]
fn test_scene_layer_operations() {
    let mut map = SceneBuilder::new().build().unwrap();
    assert_eq!(
        map.list_layers(),
        vec![TILE_LAYER_ID, START_MARKER_ID, END_MARKER_ID, MOVING_MARKER_ID]
    );

    let duplicate = Marker::new(START_MARKER_ID.to_string(), LatLng::default());
    assert!(matches!(
        map.add_layer(Box::new(duplicate)),
        Err(MapError::Layer(_))
    ));

    let removed = map.remove_layer(END_MARKER_ID).unwrap();
    assert!(removed.is_some());
    assert!(map.marker(END_MARKER_ID).is_none());

    map.with_marker_mut(START_MARKER_ID, |marker| marker.close_popup())
        .unwrap();
    assert!(!map.marker(START_MARKER_ID).unwrap().popup().unwrap().is_open());

    map.fit_bounds(
        &LatLngBounds::from_coords(22.1696, 91.4996, 22.2637, 91.7159),
        None,
    );
    assert!(map.viewport().bounds().contains(&LatLng::new(22.2637, 91.7159)));

    map.remove();
    assert!(matches!(
        map.remove_layer(START_MARKER_ID),
        Err(MapError::Layer(_))
    ));
}

#[test]
fn test_plan_matches_scene() {
    let builder = SceneBuilder::new();
    let plan = MotionPlan::new(builder.animation_config()).unwrap();
    let animator = MovingMarkerAnimator::from_plan(plan.clone());

    let samples: Vec<_> = animator.collect();
    assert_eq!(samples.len() as u64, plan.sample_count());
    assert_eq!(samples.last().unwrap().position, END_COORDS);
}
