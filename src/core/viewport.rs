use crate::core::bounds::Bounds;
use crate::core::constants::{MAX_SCALE, ZOOM_STEP};
use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Direction of a zoom request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Manages the window into the scene: current scale, pan offset, and the
/// scale bounds implied by the loaded scene rectangle.
///
/// `scale` is measured in view pixels per scene pixel; `origin` is the scene
/// coordinate that currently sits at the view's top-left corner. All other
/// conversions derive from those two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    scene_rect: Bounds,
    view_size: Point,
    scale: f64,
    origin: Point,
    min_scale: f64,
    max_scale: f64,
    zoom_step: f64,
}

impl Viewport {
    /// Creates a viewport of the given view size with default scale policy
    pub fn new(view_size: Point) -> Self {
        Self {
            scene_rect: Bounds::default(),
            view_size,
            scale: 1.0,
            origin: Point::new(0.0, 0.0),
            min_scale: 0.1,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
        }
    }

    /// Current scale in view pixels per scene pixel
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Smallest scale that still covers the whole viewport with scene
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Scene coordinate under the view's top-left corner
    pub fn pan_offset(&self) -> Point {
        self.origin
    }

    pub fn view_size(&self) -> Point {
        self.view_size
    }

    pub fn scene_rect(&self) -> &Bounds {
        &self.scene_rect
    }

    /// Installs a new scene rectangle and view size, then recomputes the
    /// minimum scale so the scene always covers the viewport with no empty
    /// border, and re-clamps the current scale against it.
    pub fn set_bounds(&mut self, scene_rect: Bounds, view_size: Point) {
        self.scene_rect = scene_rect;
        self.view_size = view_size;
        self.recalc_min_scale();
        self.clamp_to_min_scale();
    }

    /// Handles a viewport resize: the minimum scale changes with the view
    /// size, and the current scale may need to be forced back up.
    pub fn resize(&mut self, view_size: Point) {
        self.view_size = view_size;
        self.recalc_min_scale();
        self.clamp_to_min_scale();
    }

    fn recalc_min_scale(&mut self) {
        if self.scene_rect.is_empty() || self.view_size.x <= 0.0 || self.view_size.y <= 0.0 {
            return;
        }

        let sx = self.view_size.x / self.scene_rect.width();
        let sy = self.view_size.y / self.scene_rect.height();

        // max covers both directions, so no blank border can appear
        self.min_scale = sx.max(sy);
    }

    /// Converts a view-pixel position to scene coordinates
    pub fn view_to_scene(&self, view: Point) -> Point {
        self.origin.add(&view.multiply(1.0 / self.scale))
    }

    /// Converts a scene coordinate to view-pixel coordinates
    pub fn scene_to_view(&self, scene: Point) -> Point {
        scene.subtract(&self.origin).multiply(self.scale)
    }

    /// The part of the scene currently visible, in scene coordinates
    pub fn visible_scene_rect(&self) -> Bounds {
        Bounds::new(
            self.origin,
            self.view_to_scene(self.view_size),
        )
    }

    /// Zooms by one step anchored at the given view position.
    ///
    /// Returns false without any state change when the resulting scale would
    /// leave `[min_scale, max_scale]`. On acceptance the scene point under
    /// the cursor stays at the same view position.
    pub fn zoom_at_point(&mut self, view_point: Point, direction: ZoomDirection) -> bool {
        let target = match direction {
            ZoomDirection::In => self.scale * self.zoom_step,
            ZoomDirection::Out => self.scale / self.zoom_step,
        };

        if target < self.min_scale || target > self.max_scale {
            return false;
        }

        // The scene point under the cursor must keep its view position
        let scene_before = self.view_to_scene(view_point);
        self.scale = target;
        self.origin = scene_before.subtract(&view_point.multiply(1.0 / self.scale));
        true
    }

    /// Forces the scale back to `min_scale` if it has fallen below it,
    /// anchored at the viewport center.
    pub fn clamp_to_min_scale(&mut self) {
        if self.scale >= self.min_scale {
            return;
        }

        let center_view = self.view_size.multiply(0.5);
        let scene_center = self.view_to_scene(center_view);
        self.scale = self.min_scale;
        self.origin = scene_center.subtract(&center_view.multiply(1.0 / self.scale));
        self.clamp_origin();
    }

    /// Pans the view by the given view-pixel delta (content follows the
    /// pointer). Returns the delta that was actually applied after the
    /// translation limits.
    pub fn pan(&mut self, view_delta: Point) -> Point {
        let old_origin = self.origin;
        self.origin = self.origin.subtract(&view_delta.multiply(1.0 / self.scale));
        self.clamp_origin();
        old_origin.subtract(&self.origin).multiply(self.scale)
    }

    /// Centers the view on the given scene coordinate
    pub fn center_on(&mut self, scene_point: Point) {
        let half = self.view_size.multiply(0.5 / self.scale);
        self.origin = scene_point.subtract(&half);
        self.clamp_origin();
    }

    // The visible rect must always intersect the scene rect; panning past
    // that limit is silently cut short.
    fn clamp_origin(&mut self) {
        if self.scene_rect.is_empty() {
            return;
        }

        let vis = self.view_size.multiply(1.0 / self.scale);
        self.origin.x = self
            .origin
            .x
            .clamp(self.scene_rect.min.x - vis.x, self.scene_rect.max.x);
        self.origin.y = self
            .origin
            .y
            .clamp(self.scene_rect.min.y - vis.y, self.scene_rect.max.y);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Point::new(800.0, 600.0))
    }
}
