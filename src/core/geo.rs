use crate::core::constants::TILE_SIZE;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Web Mercator projection constants
pub const EARTH_RADIUS: f64 = 6378137.0;
const MAX_LATITUDE: f64 = 85.05112878;

/// Represents a geographical coordinate with longitude and latitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    /// Creates a new LonLat coordinate
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Validates that the coordinates are within the projectable range
    pub fn is_valid(&self) -> bool {
        self.lon >= -180.0
            && self.lon <= 180.0
            && self.lat >= -MAX_LATITUDE
            && self.lat <= MAX_LATITUDE
    }

    /// Clamps latitude to the Mercator-valid range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lon(lon: f64) -> f64 {
        let wrapped = lon % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }
}

impl Default for LonLat {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in scene (global pixel) or view coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a tile coordinate in the quad-tree tile pyramid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: i32, y: i32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Checks if the tile lies inside the pyramid at its zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = 1_i64 << self.z;
        self.x >= 0 && self.y >= 0 && (self.x as i64) < max_coord && (self.y as i64) < max_coord
    }
}

/// Side length of the global pixel space at the given zoom level.
pub fn map_size(zoom: u8) -> f64 {
    TILE_SIZE as f64 * 2_f64.powi(zoom as i32)
}

/// Meters represented by one pixel at the given latitude and zoom level.
///
/// Monotonically decreasing in zoom for a fixed latitude; grows toward the
/// poles for a fixed zoom.
pub fn ground_resolution(lat_deg: f64, zoom: u8) -> f64 {
    let lat = LonLat::clamp_lat(lat_deg);
    lat.to_radians().cos() * 2.0 * PI * EARTH_RADIUS / map_size(zoom)
}

/// Projects a geographic coordinate to global pixel coordinates at the given
/// zoom level (spherical Mercator, quad-tree pixel convention).
///
/// Latitude outside the Mercator-valid range is clamped, not rejected.
pub fn lon_lat_to_pixel(lon: f64, lat: f64, zoom: u8) -> Point {
    let lat = LonLat::clamp_lat(lat);
    let size = map_size(zoom);

    let x = (lon + 180.0) / 360.0;
    let sin_lat = lat.to_radians().sin();
    let y = 0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI);

    Point::new(x * size, y * size)
}

/// Top-left global pixel coordinate of a tile.
pub fn tile_to_pixel(tile: TileCoord) -> Point {
    Point::new(
        tile.x as f64 * TILE_SIZE as f64,
        tile.y as f64 * TILE_SIZE as f64,
    )
}

/// Tile containing the given global pixel coordinate.
///
/// Uses floor semantics: negative pixel coordinates map toward negative
/// infinity, not toward zero.
pub fn pixel_to_tile(pixel: Point, zoom: u8) -> TileCoord {
    TileCoord::new(
        (pixel.x / TILE_SIZE as f64).floor() as i32,
        (pixel.y / TILE_SIZE as f64).floor() as i32,
        zoom,
    )
}
