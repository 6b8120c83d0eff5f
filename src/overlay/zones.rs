use crate::core::constants::MIN_CIRCLE_RADIUS_PX;
use crate::core::geo::Point;
use crate::input::events::MouseButton;
use crate::prelude::HashSet;
use serde::{Deserialize, Serialize};

/// A circular alert zone in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleZone {
    pub center: Point,
    /// Scene units (pixels)
    pub radius: f64,
}

impl CircleZone {
    /// Containment with inclusive boundary
    pub fn contains(&self, point: &Point) -> bool {
        point.distance_to(&self.center) <= self.radius
    }
}

/// A polygonal alert zone in scene coordinates; assumed simple, not enforced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonZone {
    pub points: Vec<Point>,
}

impl PolygonZone {
    /// Even-odd ray-crossing containment test
    pub fn contains(&self, point: &Point) -> bool {
        if self.points.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = self.points.len() - 1;

        for i in 0..self.points.len() {
            let pi = &self.points[i];
            let pj = &self.points[j];

            if ((pi.y > point.y) != (pj.y > point.y))
                && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
            {
                inside = !inside;
            }
            j = i;
        }

        inside
    }
}

/// Zone-editing state; the transient geometry lives inside its variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ZoneEditState {
    Idle,
    DrawingCircle {
        center: Option<Point>,
        radius: f64,
    },
    DrawingPolygon {
        vertices: Vec<Point>,
    },
}

impl Default for ZoneEditState {
    fn default() -> Self {
        ZoneEditState::Idle
    }
}

/// Result of a containment check: the target crossed a zone boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneTransition {
    Entered,
    Exited,
}

/// Zone commit policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Pending circles smaller than this are discarded on commit
    pub min_circle_radius_px: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            min_circle_radius_px: MIN_CIRCLE_RADIUS_PX,
        }
    }
}

/// Holds committed alert zones, the interactive edit state machine, and the
/// per-target alarm latch used to edge-trigger containment events.
#[derive(Debug, Default)]
pub struct AlertZoneEngine {
    config: ZoneConfig,
    circles: Vec<CircleZone>,
    polygons: Vec<PolygonZone>,
    state: ZoneEditState,
    alarmed: HashSet<u32>,
}

impl AlertZoneEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ZoneConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Begins interactive creation of a circle zone
    pub fn start_circle(&mut self) {
        self.state = ZoneEditState::DrawingCircle {
            center: None,
            radius: 0.0,
        };
    }

    /// Begins interactive creation of a polygon zone
    pub fn start_polygon(&mut self) {
        self.state = ZoneEditState::DrawingPolygon {
            vertices: Vec::new(),
        };
    }

    /// Forces the editor back to idle, discarding any pending geometry
    pub fn stop_edit(&mut self) {
        self.state = ZoneEditState::Idle;
    }

    /// Removes every committed zone, clears the alarm latch, and stops
    /// any edit in progress
    pub fn clear_all(&mut self) {
        self.circles.clear();
        self.polygons.clear();
        self.alarmed.clear();
        self.stop_edit();
    }

    pub fn is_editing(&self) -> bool {
        self.state != ZoneEditState::Idle
    }

    pub fn state(&self) -> &ZoneEditState {
        &self.state
    }

    pub fn circles(&self) -> &[CircleZone] {
        &self.circles
    }

    pub fn polygons(&self) -> &[PolygonZone] {
        &self.polygons
    }

    /// Pending circle geometry (center, radius), once the center is placed
    pub fn pending_circle(&self) -> Option<(Point, f64)> {
        match self.state {
            ZoneEditState::DrawingCircle {
                center: Some(center),
                radius,
            } => Some((center, radius)),
            _ => None,
        }
    }

    /// Pending polygon vertices; empty unless a polygon is being drawn
    pub fn pending_vertices(&self) -> &[Point] {
        match &self.state {
            ZoneEditState::DrawingPolygon { vertices } => vertices,
            _ => &[],
        }
    }

    /// Handles a button press at the given scene position. Returns whether
    /// the event was consumed by the editor.
    pub fn pointer_pressed(&mut self, button: MouseButton, scene_pos: Point) -> bool {
        match (&mut self.state, button) {
            (ZoneEditState::DrawingCircle { center, .. }, MouseButton::Left) => {
                // First press anchors the center; later presses are ignored
                if center.is_none() {
                    *center = Some(scene_pos);
                }
                true
            }
            (ZoneEditState::DrawingCircle { .. }, MouseButton::Right) => {
                self.stop_edit();
                true
            }
            (ZoneEditState::DrawingPolygon { vertices }, MouseButton::Left) => {
                vertices.push(scene_pos);
                true
            }
            (ZoneEditState::DrawingPolygon { vertices }, MouseButton::Right) => {
                // A thin polygon is an accidental click sequence, not a zone
                if vertices.len() >= 3 {
                    self.polygons.push(PolygonZone {
                        points: std::mem::take(vertices),
                    });
                    log::debug!("committed polygon zone ({} total)", self.polygons.len());
                }
                self.stop_edit();
                true
            }
            _ => false,
        }
    }

    /// Handles pointer motion: stretches the pending circle radius
    pub fn pointer_moved(&mut self, scene_pos: Point) -> bool {
        if let ZoneEditState::DrawingCircle {
            center: Some(center),
            radius,
        } = &mut self.state
        {
            *radius = center.distance_to(&scene_pos);
            return true;
        }
        false
    }

    /// Handles a button release: commits the pending circle if it is large
    /// enough, then returns to idle
    pub fn pointer_released(&mut self, button: MouseButton, _scene_pos: Point) -> bool {
        if button != MouseButton::Left {
            return false;
        }

        if let ZoneEditState::DrawingCircle {
            center: Some(center),
            radius,
        } = self.state
        {
            if radius > self.config.min_circle_radius_px {
                self.circles.push(CircleZone { center, radius });
                log::debug!("committed circle zone ({} total)", self.circles.len());
            }
            self.stop_edit();
            return true;
        }
        false
    }

    /// Tests whether a point lies inside any committed zone.
    ///
    /// Circles are tested first and polygons skipped on a hit; only the
    /// boolean membership matters, so the short-circuit is purely a
    /// performance matter.
    pub fn contains(&self, scene_pos: &Point) -> bool {
        if self.circles.iter().any(|c| c.contains(scene_pos)) {
            return true;
        }
        self.polygons.iter().any(|p| p.contains(scene_pos))
    }

    /// Runs the containment check for one target position and updates the
    /// alarm latch.
    ///
    /// Returns `Some(Entered)` exactly once per physical zone entry and
    /// `Some(Exited)` once when the target leaves again; steady state in
    /// either direction returns `None`.
    pub fn check_zones(&mut self, target_id: u32, scene_pos: Point) -> Option<ZoneTransition> {
        let in_any_zone = self.contains(&scene_pos);
        let was_in = self.alarmed.contains(&target_id);

        if in_any_zone && !was_in {
            self.alarmed.insert(target_id);
            Some(ZoneTransition::Entered)
        } else if !in_any_zone && was_in {
            self.alarmed.remove(&target_id);
            Some(ZoneTransition::Exited)
        } else {
            None
        }
    }

    /// Targets currently latched inside at least one zone
    pub fn alarmed(&self) -> &HashSet<u32> {
        &self.alarmed
    }
}
