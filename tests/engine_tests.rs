//! Integration tests driving the engine the way an embedding application
//! would: load an offline tile store, feed radar fixes through the public
//! entry point, draw zones with pointer events, and read state back through
//! the render-layer queries.

use radarmap::prelude::*;
use std::fs;
use std::time::Duration;

/// Writes a minimal offline tile store and returns its root directory.
fn make_tile_store(tiles: &[(i32, i32)], zoom: u8) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (x, y) in tiles {
        let col = dir.path().join(zoom.to_string()).join(x.to_string());
        fs::create_dir_all(&col).unwrap();
        fs::write(col.join(format!("{}.jpg", y)), b"tile-bytes").unwrap();
    }
    dir
}

/// Center coordinate used by the fixtures; arbitrary but fixed.
const CENTER_LON: f64 = 121.47;
const CENTER_LAT: f64 = 31.23;

fn loaded_map(store: &tempfile::TempDir, zoom: u8) -> RadarMap {
    let mut map = RadarMap::new(Point::new(400.0, 300.0));
    map.load_map_area(zoom, store.path(), CENTER_LON, CENTER_LAT)
        .unwrap();
    map
}

#[test]
fn discovery_end_to_end_bounding_rect() {
    let store = make_tile_store(&[(0, 0), (0, 1), (1, 0)], 17);

    let tiles = index::discover(store.path(), 17).unwrap();
    assert_eq!(tiles.len(), 3);

    let rect = index::bounding_scene_rect(&tiles);
    assert_eq!(rect.min, Point::new(0.0, 0.0));
    assert_eq!(rect.max, Point::new(512.0, 512.0));
}

#[test]
fn load_map_area_aborts_cleanly_on_empty_store() {
    let empty = tempfile::tempdir().unwrap();
    let mut map = RadarMap::new(Point::new(400.0, 300.0));
    let scale_before = map.viewport.scale();

    let err = map
        .load_map_area(17, empty.path(), CENTER_LON, CENTER_LAT)
        .unwrap_err();
    assert!(matches!(err, MapError::EmptyTileSet { zoom: 17, .. }));

    // Nothing was altered: no tiles, no HUD, untouched viewport
    assert!(map.tiles().is_empty());
    assert!(map.hud().is_none());
    assert_eq!(map.viewport.scale(), scale_before);
}

#[test]
fn load_map_area_establishes_scene_and_hud() {
    // A tile neighborhood around the projected center at zoom 17
    let center_px = lon_lat_to_pixel(CENTER_LON, CENTER_LAT, 17);
    let center_tile = pixel_to_tile(center_px, 17);
    let mut tiles = Vec::new();
    for dx in -1..=1 {
        for dy in -1..=1 {
            tiles.push((center_tile.x + dx, center_tile.y + dy));
        }
    }

    let store = make_tile_store(&tiles, 17);
    let map = loaded_map(&store, 17);

    assert_eq!(map.tiles().len(), 9);
    assert_eq!(map.scene_rect().width(), 3.0 * 256.0);
    assert_eq!(map.scene_rect().height(), 3.0 * 256.0);

    let hud = map.hud().unwrap();
    assert_eq!(hud.center_scene, center_px);
    assert_eq!(hud.ring_meters.len(), 8);
    assert_eq!(hud.cross_arm_meters, 2400.0);

    // The view is centered on the projected coordinate
    let center_view = map.viewport.view_size().multiply(0.5);
    let at_center = map.viewport.view_to_scene(center_view);
    assert!(at_center.distance_to(&center_px) < 1e-6);
}

#[test]
fn request_tiles_delivers_bytes_on_the_channel() {
    let store = make_tile_store(&[(0, 0), (0, 1), (1, 0)], 17);
    let map = loaded_map(&store, 17);

    let (loader, rx) = TileLoader::unbounded();
    map.request_tiles(&loader);

    let mut got = Vec::new();
    for _ in 0..3 {
        let (coord, bytes) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(bytes, b"tile-bytes");
        got.push((coord.x, coord.y));
    }
    got.sort();
    assert_eq!(got, vec![(0, 0), (0, 1), (1, 0)]);
}

#[test]
fn ingest_fix_pipeline_places_tracks_and_raises_alarms() {
    let store = make_tile_store(&[(0, 0)], 17);
    let mut map = loaded_map(&store, 17);
    let center = map.map_center();

    // Draw a circle zone around the map center via the pointer interface
    map.start_circle_zone();
    let center_view = map.viewport.scene_to_view(center);
    map.handle_event(InputEvent::PointerPressed {
        position: center_view,
        button: MouseButton::Left,
    });
    map.handle_event(InputEvent::PointerMoved {
        position: center_view.add(&Point::new(100.0, 0.0)),
    });
    map.handle_event(InputEvent::PointerReleased {
        position: center_view.add(&Point::new(100.0, 0.0)),
        button: MouseButton::Left,
    });

    assert_eq!(map.circle_zones().len(), 1);
    let radius_scene = map.circle_zones()[0].radius;

    // A fix well inside the zone radius
    let meters_inside = radius_scene * 0.5 * ground_resolution(CENTER_LAT, 17);
    // And one far outside
    let meters_outside = radius_scene * 10.0 * ground_resolution(CENTER_LAT, 17);

    let inside = RadarFix::new(1, 45.0, 0.0, meters_inside, CENTER_LAT);
    let outside = RadarFix::new(1, 45.0, 0.0, meters_outside, CENTER_LAT);

    let mut alerts = 0;
    for fix in [inside, inside, outside, inside, outside] {
        map.ingest_fix(fix);
        for event in map.poll_events() {
            if let EngineEvent::AlertTriggered { target_id } = event {
                assert_eq!(target_id, 1);
                alerts += 1;
            }
        }
    }

    // Two outside->inside transitions: the initial entry and the re-entry
    assert_eq!(alerts, 2);

    // The track recorded the distinct positions
    let track = map.tracks().track(1).unwrap();
    assert!(track.len() >= 2);
    assert_eq!(map.tracks().latest(1).unwrap(), *track.back().unwrap());
}

#[test]
fn selection_by_click_and_guide_signal() {
    let store = make_tile_store(&[(0, 0)], 17);
    let mut map = loaded_map(&store, 17);

    let fix = RadarFix::new(7, 120.0, 1.5, 400.0, CENTER_LAT);
    map.ingest_fix(fix);

    let target_view = map
        .viewport
        .scene_to_view(map.tracks().latest(7).unwrap());

    // A primary click near the target selects it
    map.handle_event(InputEvent::PointerReleased {
        position: target_view.add(&Point::new(4.0, -3.0)),
        button: MouseButton::Left,
    });
    assert_eq!(map.selected_target(), Some(7));

    let info = map.selected_target_info().unwrap();
    assert_eq!(info.target_id, 7);
    assert_eq!(info.range_meters, 400.0);

    // The next fix for the selected target emits the guidance signal
    map.poll_events();
    map.ingest_fix(RadarFix::new(7, 121.0, 1.6, 410.0, CENTER_LAT));
    assert!(map.poll_events().iter().any(|e| matches!(
        e,
        EngineEvent::TargetGuide { azimuth_deg, .. } if *azimuth_deg == 121.0
    )));
}

#[test]
fn zone_editing_consumes_pointer_events_from_picking() {
    let store = make_tile_store(&[(0, 0)], 17);
    let mut map = loaded_map(&store, 17);
    map.ingest_fix(RadarFix::new(3, 0.0, 0.0, 200.0, CENTER_LAT));

    let target_view = map
        .viewport
        .scene_to_view(map.tracks().latest(3).unwrap());

    // While drawing a polygon, a click on a target adds a vertex instead
    // of selecting it
    map.start_polygon_zone();
    map.handle_event(InputEvent::PointerPressed {
        position: target_view,
        button: MouseButton::Left,
    });
    assert_eq!(map.selected_target(), None);
    assert_eq!(map.zone_engine().pending_vertices().len(), 1);

    // Secondary click with too few vertices discards the pending polygon
    map.handle_event(InputEvent::PointerPressed {
        position: target_view,
        button: MouseButton::Right,
    });
    assert!(map.polygon_zones().is_empty());
    assert!(!map.zone_engine().is_editing());
}

#[test]
fn scroll_zoom_is_cursor_anchored() {
    // A neighborhood around the projected center, so the centered view
    // starts well inside the scene
    let center_tile = pixel_to_tile(lon_lat_to_pixel(CENTER_LON, CENTER_LAT, 17), 17);
    let mut tiles = Vec::new();
    for dx in -2..=2 {
        for dy in -2..=2 {
            tiles.push((center_tile.x + dx, center_tile.y + dy));
        }
    }
    let store = make_tile_store(&tiles, 17);
    let mut map = loaded_map(&store, 17);

    let cursor = Point::new(120.0, 90.0);
    let scene_before = map.viewport.view_to_scene(cursor);

    assert!(map.handle_event(InputEvent::Scroll {
        delta: 1.0,
        position: cursor,
    }));

    let view_after = map.viewport.scene_to_view(scene_before);
    assert!((view_after.x - cursor.x).abs() < 1e-9);
    assert!((view_after.y - cursor.y).abs() < 1e-9);
}

#[test]
fn resize_reclamps_the_viewport_scale() {
    let store = make_tile_store(&[(0, 0)], 17);
    let mut map = loaded_map(&store, 17);

    map.handle_event(InputEvent::Resize {
        size: Point::new(2000.0, 1600.0),
    });
    assert!(map.viewport.scale() >= map.viewport.min_scale());
}

#[test]
fn clear_zones_resets_alarm_state() {
    let store = make_tile_store(&[(0, 0)], 17);
    let mut map = loaded_map(&store, 17);
    let center = map.map_center();

    map.start_circle_zone();
    let center_view = map.viewport.scene_to_view(center);
    map.handle_event(InputEvent::PointerPressed {
        position: center_view,
        button: MouseButton::Left,
    });
    map.handle_event(InputEvent::PointerMoved {
        position: center_view.add(&Point::new(80.0, 0.0)),
    });
    map.handle_event(InputEvent::PointerReleased {
        position: center_view.add(&Point::new(80.0, 0.0)),
        button: MouseButton::Left,
    });

    map.ingest_fix(RadarFix::new(9, 0.0, 0.0, 1.0, CENTER_LAT));
    assert!(!map.poll_events().is_empty());

    map.clear_zones();
    assert!(map.circle_zones().is_empty());
    assert!(map.zone_engine().alarmed().is_empty());
}

#[test]
fn public_data_model_round_trips_through_json() {
    let fix = RadarFix::new(1, 30.0, 0.5, 800.0, CENTER_LAT);
    let json = serde_json::to_string(&fix).unwrap();
    let back: RadarFix = serde_json::from_str(&json).unwrap();
    assert_eq!(fix, back);

    let zone = CircleZone {
        center: Point::new(10.0, 20.0),
        radius: 50.0,
    };
    let json = serde_json::to_string(&zone).unwrap();
    let back: CircleZone = serde_json::from_str(&json).unwrap();
    assert_eq!(zone, back);
}
