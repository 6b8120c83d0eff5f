//! Prelude module for common radarmap types
//!
//! This module re-exports the most commonly used types and functions for
//! easy importing with `use radarmap::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    constants,
    geo::{
        ground_resolution, lon_lat_to_pixel, map_size, pixel_to_tile, tile_to_pixel, LonLat,
        Point, TileCoord,
    },
    map::{EngineEvent, MapOptions, RadarHud, RadarMap, TargetInfo},
    viewport::{Viewport, ZoomDirection},
};

pub use crate::input::events::{InputEvent, MouseButton};

pub use crate::overlay::{
    track::{fix_scene_position, RadarFix, TrackConfig, TrackStore},
    zones::{
        AlertZoneEngine, CircleZone, PolygonZone, ZoneConfig, ZoneEditState, ZoneTransition,
    },
};

pub use crate::tiles::{cache::TileCache, index, loader::TileLoader};

pub use crate::{Error as MapError, Result};

pub use std::collections::VecDeque;
pub use std::path::{Path, PathBuf};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
