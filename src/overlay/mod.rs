pub mod track;
pub mod zones;

// Re-exports for convenience
pub use track::{fix_scene_position, RadarFix, TrackConfig, TrackStore};
pub use zones::{
    AlertZoneEngine, CircleZone, PolygonZone, ZoneConfig, ZoneEditState, ZoneTransition,
};
