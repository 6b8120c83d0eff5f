use crate::{
    core::{
        bounds::Bounds,
        constants::{
            CROSS_ARM_METERS, MAJOR_RING_STEP_METERS, MAX_ZOOM, MIN_ZOOM, PICK_RADIUS_PX,
            RING_MAX_METERS, RING_STEP_METERS,
        },
        geo::{ground_resolution, lon_lat_to_pixel, Point, TileCoord},
        viewport::{Viewport, ZoomDirection},
    },
    input::events::{InputEvent, MouseButton},
    overlay::{
        track::{RadarFix, TrackStore},
        zones::{AlertZoneEngine, CircleZone, PolygonZone, ZoneTransition},
    },
    tiles::{index, loader::TileLoader},
    Result,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Engine-level options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    /// Hit radius in view pixels for picking a target with a click
    pub pick_radius_px: f64,
    /// Image extension of the offline tile store
    pub tile_ext: String,
    /// Range-ring spacing in meters
    pub ring_step_meters: f64,
    /// Outermost range ring in meters
    pub ring_max_meters: f64,
    /// Center-cross arm length in meters
    pub cross_arm_meters: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            pick_radius_px: PICK_RADIUS_PX,
            tile_ext: "jpg".to_string(),
            ring_step_meters: RING_STEP_METERS,
            ring_max_meters: RING_MAX_METERS,
            cross_arm_meters: CROSS_ARM_METERS,
        }
    }
}

/// Events queued by the engine for the embedding application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A target entered at least one alert zone (edge-triggered)
    AlertTriggered { target_id: u32 },
    /// The selected target received a new fix; steer toward it
    TargetGuide { azimuth_deg: f64, elevation_deg: f64 },
}

/// Radar HUD parameters the render layer reads to draw range rings and the
/// center cross
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarHud {
    pub center_scene: Point,
    pub center_lat_deg: f64,
    pub zoom: u8,
    pub ring_meters: Vec<f64>,
    pub cross_arm_meters: f64,
    pub major_ring_step_meters: u32,
}

/// Structured view-model for the selected target's info panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetInfo {
    pub target_id: u32,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_meters: f64,
}

/// The engine facade: owns the viewport, the discovered tile set, the track
/// store and the alert-zone engine, and sequences the per-fix transaction.
pub struct RadarMap {
    pub viewport: Viewport,
    options: MapOptions,
    tiles: Vec<TileCoord>,
    tile_root: Option<PathBuf>,
    zoom: u8,
    map_center: Point,
    hud: Option<RadarHud>,
    tracks: TrackStore,
    zones: AlertZoneEngine,
    events: VecDeque<EngineEvent>,
}

impl RadarMap {
    pub fn new(view_size: Point) -> Self {
        Self::with_options(view_size, MapOptions::default())
    }

    pub fn with_options(view_size: Point, options: MapOptions) -> Self {
        Self {
            viewport: Viewport::new(view_size),
            options,
            tiles: Vec::new(),
            tile_root: None,
            zoom: MIN_ZOOM,
            map_center: Point::default(),
            hud: None,
            tracks: TrackStore::new(),
            zones: AlertZoneEngine::new(),
            events: VecDeque::new(),
        }
    }

    /// Loads an offline map area: discovers tiles, establishes the scene
    /// rectangle, and centers the view on the given geographic coordinate.
    ///
    /// On [`crate::MapError::EmptyTileSet`] no state is altered; a previous
    /// map, if any, stays in place.
    pub fn load_map_area(
        &mut self,
        zoom: u8,
        root: &Path,
        center_lon: f64,
        center_lat: f64,
    ) -> Result<()> {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);

        let tiles = index::discover(root, zoom)?;
        let scene_rect = index::bounding_scene_rect(&tiles);

        self.tiles = tiles;
        self.tile_root = Some(root.to_path_buf());
        self.zoom = zoom;
        self.viewport
            .set_bounds(scene_rect, self.viewport.view_size());

        self.map_center = lon_lat_to_pixel(center_lon, center_lat, zoom);
        self.viewport.center_on(self.map_center);

        let rings = ring_sequence(self.options.ring_step_meters, self.options.ring_max_meters);
        self.hud = Some(RadarHud {
            center_scene: self.map_center,
            center_lat_deg: center_lat,
            zoom,
            ring_meters: rings,
            cross_arm_meters: self.options.cross_arm_meters,
            major_ring_step_meters: MAJOR_RING_STEP_METERS,
        });

        log::info!(
            "loaded map area at zoom {} ({} tiles), center ({:.5}, {:.5})",
            zoom,
            self.tiles.len(),
            center_lon,
            center_lat
        );
        Ok(())
    }

    /// Requests a background read of every discovered tile. Completed tiles
    /// arrive on the loader's channel in arbitrary order.
    pub fn request_tiles(&self, loader: &TileLoader) {
        if let Some(root) = &self.tile_root {
            for &tile in &self.tiles {
                loader.start_load(root, &self.options.tile_ext, tile);
            }
        }
    }

    /// Ingests one radar fix as a single transaction: project to scene
    /// coordinates, store as latest, append to the track, run the
    /// containment check, and queue the resulting events. Synthetic and
    /// real fixes are indistinguishable here; this is the only entry point.
    ///
    /// Returns the fix's scene position.
    pub fn ingest_fix(&mut self, fix: RadarFix) -> Point {
        let target_id = fix.target_id;
        let azimuth_deg = fix.azimuth_deg;
        let elevation_deg = fix.elevation_deg;

        let scene_pos = self.tracks.ingest_fix(fix, self.map_center, self.zoom);

        if self.tracks.selected() == Some(target_id) {
            self.events.push_back(EngineEvent::TargetGuide {
                azimuth_deg,
                elevation_deg,
            });
        }

        // Only entries become events; exits clear the latch silently
        if self.zones.check_zones(target_id, scene_pos) == Some(ZoneTransition::Entered) {
            log::info!("target {} entered an alert zone", target_id);
            self.events.push_back(EngineEvent::AlertTriggered { target_id });
        }

        scene_pos
    }

    /// Routes an input event: the zone editor consumes pointer events while
    /// it is active, otherwise a primary click picks a target; scrolling
    /// zooms at the cursor and resizes re-clamp the viewport. Returns
    /// whether the event changed any state.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Resize { size } => {
                self.viewport.resize(size);
                true
            }
            InputEvent::Scroll { delta, position } => {
                let direction = if delta > 0.0 {
                    ZoomDirection::In
                } else {
                    ZoomDirection::Out
                };
                self.viewport.zoom_at_point(position, direction)
            }
            InputEvent::PointerPressed { position, button } if self.zones.is_editing() => {
                let scene = self.viewport.view_to_scene(position);
                self.zones.pointer_pressed(button, scene)
            }
            InputEvent::PointerMoved { position } if self.zones.is_editing() => {
                let scene = self.viewport.view_to_scene(position);
                self.zones.pointer_moved(scene)
            }
            InputEvent::PointerReleased { position, button } if self.zones.is_editing() => {
                let scene = self.viewport.view_to_scene(position);
                self.zones.pointer_released(button, scene)
            }
            InputEvent::PointerReleased { position, button } if button == MouseButton::Left => {
                self.pick_target(position);
                true
            }
            _ => false,
        }
    }

    /// Selects the target whose latest position is closest to the given
    /// view position within the pick radius; clears the selection when
    /// nothing is in range. Returns the new selection.
    pub fn pick_target(&mut self, view_pos: Point) -> Option<u32> {
        let mut best: Option<(u32, f64)> = None;

        for (id, scene_pos) in self.tracks.latest_positions() {
            let d = self.viewport.scene_to_view(scene_pos).distance_to(&view_pos);
            if d < self.options.pick_radius_px && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((id, d));
            }
        }

        let picked = best.map(|(id, _)| id);
        self.tracks.select(picked);
        picked
    }

    /// View-model for the selected target, or None when nothing is selected
    /// or the selection has no fix yet
    pub fn selected_target_info(&self) -> Option<TargetInfo> {
        let id = self.tracks.selected()?;
        let fix = self.tracks.latest_fix(id)?;
        Some(TargetInfo {
            target_id: id,
            azimuth_deg: fix.azimuth_deg,
            elevation_deg: fix.elevation_deg,
            range_meters: fix.range_meters,
        })
    }

    /// Converts a distance in meters at the map center to view pixels at
    /// the current scale
    pub fn meters_to_view_px(&self, meters: f64) -> f64 {
        let lat = self.hud.as_ref().map(|h| h.center_lat_deg).unwrap_or(0.0);
        meters / ground_resolution(lat, self.zoom) * self.viewport.scale()
    }

    /// Drains the outbound event queue
    pub fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }

    // ----- zone editing, delegated to the zone engine -----

    pub fn start_circle_zone(&mut self) {
        self.zones.start_circle();
    }

    pub fn start_polygon_zone(&mut self) {
        self.zones.start_polygon();
    }

    pub fn stop_zone_edit(&mut self) {
        self.zones.stop_edit();
    }

    pub fn clear_zones(&mut self) {
        self.zones.clear_all();
    }

    // ----- queries for the render layer -----

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn map_center(&self) -> Point {
        self.map_center
    }

    pub fn tiles(&self) -> &[TileCoord] {
        &self.tiles
    }

    pub fn scene_rect(&self) -> &Bounds {
        self.viewport.scene_rect()
    }

    pub fn hud(&self) -> Option<&RadarHud> {
        self.hud.as_ref()
    }

    pub fn circle_zones(&self) -> &[CircleZone] {
        self.zones.circles()
    }

    pub fn polygon_zones(&self) -> &[PolygonZone] {
        self.zones.polygons()
    }

    pub fn zone_engine(&self) -> &AlertZoneEngine {
        &self.zones
    }

    pub fn tracks(&self) -> &TrackStore {
        &self.tracks
    }

    pub fn select_target(&mut self, target_id: Option<u32>) {
        self.tracks.select(target_id);
    }

    pub fn selected_target(&self) -> Option<u32> {
        self.tracks.selected()
    }
}

fn ring_sequence(step: f64, max: f64) -> Vec<f64> {
    let mut rings = Vec::new();
    let mut r = step;
    while r <= max {
        rings.push(r);
        r += step;
    }
    rings
}
