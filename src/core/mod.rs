pub mod bounds;
pub mod constants;
pub mod geo;
pub mod map;
pub mod viewport;

// Re-export the essential types
pub use bounds::Bounds;
pub use geo::{LonLat, Point, TileCoord};
pub use map::{EngineEvent, MapOptions, RadarHud, RadarMap, TargetInfo};
pub use viewport::{Viewport, ZoomDirection};
