//! # radarmap
//!
//! An offline tiled-map radar overlay engine.
//!
//! The crate covers the non-visual half of a radar map console: the
//! spherical-Mercator quad-tree projection, the pan/zoom viewport
//! transform, discovery and background loading of an on-disk tile store,
//! bounded per-target track histories, and operator-drawn alert zones with
//! edge-triggered containment alarms. Rendering, window management and fix
//! generation stay with the embedding application, which drives the engine
//! through [`RadarMap`] and reads its state back through queries.

pub mod core;
pub mod input;
pub mod overlay;
pub mod tiles;

pub mod prelude;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    geo::{LonLat, Point, TileCoord},
    map::{EngineEvent, MapOptions, RadarHud, RadarMap, TargetInfo},
    viewport::{Viewport, ZoomDirection},
};

pub use crate::input::events::{InputEvent, MouseButton};

pub use crate::overlay::{
    track::{RadarFix, TrackConfig, TrackStore},
    zones::{AlertZoneEngine, CircleZone, PolygonZone, ZoneConfig, ZoneEditState, ZoneTransition},
};

pub use crate::tiles::{cache::TileCache, loader::TileLoader};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no tiles found for zoom {zoom} under {path:?}")]
    EmptyTileSet {
        zoom: u8,
        path: std::path::PathBuf,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

/// Error type alias for convenience
pub type Error = MapError;
