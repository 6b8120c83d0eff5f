use crate::core::geo::TileCoord;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// In-memory cache of raw tile bytes with LRU eviction.
///
/// Owned by the thread that drives the engine; loader threads never touch
/// it directly (they deliver bytes over the channel and the owner inserts).
#[derive(Debug)]
pub struct TileCache {
    cache: LruCache<TileCoord, Arc<Vec<u8>>>,
}

impl TileCache {
    /// Create a new tile cache with the given capacity
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1024).unwrap());
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Create a new tile cache with default capacity (1024 tiles)
    pub fn with_default_capacity() -> Self {
        Self::new(1024)
    }

    /// Get a tile from the cache, marking it most recently used
    pub fn get(&mut self, coord: &TileCoord) -> Option<Arc<Vec<u8>>> {
        self.cache.get(coord).cloned()
    }

    /// Insert a tile into the cache
    pub fn insert(&mut self, coord: TileCoord, data: Vec<u8>) {
        self.cache.put(coord, Arc::new(data));
    }

    /// Check if a tile is in the cache without touching recency
    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.cache.contains(coord)
    }

    /// Clear all tiles from the cache
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Get the current number of cached tiles
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
