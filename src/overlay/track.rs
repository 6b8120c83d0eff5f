use crate::core::constants::{MAX_TRACK_POINTS, TRACK_DEDUPE_PX};
use crate::core::geo::{ground_resolution, Point};
use crate::prelude::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A polar radar measurement relative to the fixed map center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarFix {
    pub target_id: u32,
    /// Azimuth in degrees, clockwise from north
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_meters: f64,
    /// Latitude used for the meters-to-pixels conversion
    pub reference_lat_deg: f64,
}

impl RadarFix {
    pub fn new(
        target_id: u32,
        azimuth_deg: f64,
        elevation_deg: f64,
        range_meters: f64,
        reference_lat_deg: f64,
    ) -> Self {
        Self {
            target_id,
            azimuth_deg,
            elevation_deg,
            range_meters,
            reference_lat_deg,
        }
    }
}

/// Track retention policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Maximum points kept per track; oldest are evicted first
    pub max_track_points: usize,
    /// A new point closer than this to the last stored point is dropped
    pub dedupe_px: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            max_track_points: MAX_TRACK_POINTS,
            dedupe_px: TRACK_DEDUPE_PX,
        }
    }
}

/// Converts a polar fix to a cartesian scene position around the map center.
///
/// Azimuth 0° points north; pixel y grows downward, hence the negated
/// cosine term.
pub fn fix_scene_position(fix: &RadarFix, map_center: Point, zoom: u8) -> Point {
    let meters_per_pixel = ground_resolution(fix.reference_lat_deg, zoom);
    let range_px = fix.range_meters / meters_per_pixel;

    let rad = fix.azimuth_deg.to_radians();
    let dx = range_px * rad.sin();
    let dy = -range_px * rad.cos();

    Point::new(map_center.x + dx, map_center.y + dy)
}

/// Per-target state: the latest fix, its scene position, and the bounded
/// track history.
#[derive(Debug, Default)]
pub struct TrackStore {
    config: TrackConfig,
    fixes: HashMap<u32, RadarFix>,
    positions: HashMap<u32, Point>,
    tracks: HashMap<u32, VecDeque<Point>>,
    selected: Option<u32>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrackConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Records one fix: converts it to a scene position, stores it as the
    /// target's latest, and appends it to the track history. Returns the
    /// scene position.
    pub fn ingest_fix(&mut self, fix: RadarFix, map_center: Point, zoom: u8) -> Point {
        let scene_pos = fix_scene_position(&fix, map_center, zoom);
        self.fixes.insert(fix.target_id, fix);
        self.positions.insert(fix.target_id, scene_pos);
        self.append_track_point(fix.target_id, scene_pos);
        scene_pos
    }

    /// Appends a track point, subject to the dedupe threshold and length
    /// cap. Returns whether the point was actually stored.
    pub fn append_track_point(&mut self, target_id: u32, scene_pos: Point) -> bool {
        let track = self.tracks.entry(target_id).or_default();

        // Drop near-duplicate points so the polyline doesn't degenerate
        if let Some(last) = track.back() {
            if last.distance_to(&scene_pos) < self.config.dedupe_px {
                return false;
            }
        }

        track.push_back(scene_pos);
        while track.len() > self.config.max_track_points {
            track.pop_front();
        }
        true
    }

    /// Latest scene position of a target
    pub fn latest(&self, target_id: u32) -> Option<Point> {
        self.positions.get(&target_id).copied()
    }

    /// Latest raw fix of a target
    pub fn latest_fix(&self, target_id: u32) -> Option<&RadarFix> {
        self.fixes.get(&target_id)
    }

    /// Ordered track history of a target, oldest first
    pub fn track(&self, target_id: u32) -> Option<&VecDeque<Point>> {
        self.tracks.get(&target_id)
    }

    /// Latest scene position of every known target
    pub fn latest_positions(&self) -> impl Iterator<Item = (u32, Point)> + '_ {
        self.positions.iter().map(|(&id, &pos)| (id, pos))
    }

    /// Selects a target, or clears the selection. Selection is pure state
    /// and does not affect ingestion.
    pub fn select(&mut self, target_id: Option<u32>) {
        self.selected = target_id;
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }
}
