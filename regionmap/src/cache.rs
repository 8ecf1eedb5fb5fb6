//! In-memory tile cache.
//!
//! Decoded tiles are cached per generator instance and never invalidated:
//! once a key is populated it stays for the instance's lifetime. The cache is
//! backed by `moka::future::Cache`, which is lock-free for reads and safe to
//! share across concurrent renders. Entries hold `Arc`ed images so a hit
//! never copies pixel data.
//!
//! The default cache is unbounded. Callers that render many distinct areas
//! from one long-lived generator can opt into an entry limit, which turns on
//! moka's LRU-style eviction.

use std::sync::Arc;

use image::RgbaImage;
use moka::future::Cache;

use crate::coord::TileCoord;

/// Cache of decoded tiles keyed by `(zoom, x, y)`.
pub struct TileCache {
    inner: Cache<TileCoord, Arc<RgbaImage>>,
}

impl TileCache {
    /// Creates a cache that keeps every tile until the owner is dropped.
    pub fn unbounded() -> Self {
        Self {
            inner: Cache::builder().build(),
        }
    }

    /// Creates a cache bounded to `max_tiles` entries with automatic
    /// eviction.
    pub fn bounded(max_tiles: u64) -> Self {
        Self {
            inner: Cache::builder().max_capacity(max_tiles).build(),
        }
    }

    /// Look up a tile. Entries are immutable once stored.
    pub async fn get(&self, coord: &TileCoord) -> Option<Arc<RgbaImage>> {
        self.inner.get(coord).await
    }

    /// Store a tile. Replaces any existing entry for the key; two renders
    /// racing on the same miss insert identical images, so the outcome does
    /// not depend on which wins.
    pub async fn insert(&self, coord: TileCoord, tile: Arc<RgbaImage>) {
        self.inner.insert(coord, tile).await;
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(width: u32, height: u32) -> Arc<RgbaImage> {
        Arc::new(RgbaImage::new(width, height))
    }

    #[tokio::test]
    async fn test_get_returns_inserted_tile() {
        let cache = TileCache::unbounded();
        let coord = TileCoord::new(44, 21, 11);

        assert!(cache.get(&coord).await.is_none());
        cache.insert(coord, tile(256, 256)).await;

        let hit = cache.get(&coord).await.expect("tile should be cached");
        assert_eq!(hit.dimensions(), (256, 256));
    }

    #[tokio::test]
    async fn test_keys_distinguish_zoom() {
        let cache = TileCache::unbounded();
        cache.insert(TileCoord::new(1, 1, 11), tile(256, 256)).await;

        assert!(cache.get(&TileCoord::new(1, 1, 7)).await.is_none());
        assert!(cache.get(&TileCoord::new(1, 1, 11)).await.is_some());
    }

    #[tokio::test]
    async fn test_hit_shares_the_same_image() {
        let cache = TileCache::default();
        let coord = TileCoord::new(0, 0, 7);
        let stored = tile(256, 256);
        cache.insert(coord, Arc::clone(&stored)).await;

        let hit = cache.get(&coord).await.unwrap();
        assert!(Arc::ptr_eq(&stored, &hit));
    }
}
