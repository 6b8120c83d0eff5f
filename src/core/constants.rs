//! Engine-wide constants derived from the quad-tree tile convention and the
//! radar console defaults. Keeping them in a single place makes it easier to
//! tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Lowest zoom level the tile pyramid supports.
pub const MIN_ZOOM: u8 = 1;

/// Highest zoom level the tile pyramid supports.
pub const MAX_ZOOM: u8 = 23;

/// Multiplicative step applied per wheel notch when zooming.
pub const ZOOM_STEP: f64 = 1.25;

/// Upper bound on the viewport scale (view pixels per scene pixel).
pub const MAX_SCALE: f64 = 3.0;

/// Maximum number of points retained per target track; oldest drop first.
pub const MAX_TRACK_POINTS: usize = 60;

/// Minimum scene-pixel distance between consecutive stored track points.
pub const TRACK_DEDUPE_PX: f64 = 1.0;

/// A pending circle zone smaller than this is treated as an accidental
/// click and discarded on commit.
pub const MIN_CIRCLE_RADIUS_PX: f64 = 5.0;

/// Hit radius in view pixels for selecting a target with a click.
pub const PICK_RADIUS_PX: f64 = 30.0;

/// Spacing of the radar range rings in meters.
pub const RING_STEP_METERS: f64 = 300.0;

/// Outermost radar range ring in meters.
pub const RING_MAX_METERS: f64 = 2400.0;

/// Rings at multiples of this distance are drawn as major rings.
pub const MAJOR_RING_STEP_METERS: u32 = 600;

/// Arm length of the radar center cross in meters.
pub const CROSS_ARM_METERS: f64 = 2400.0;
