//! Tile retrieval with failure tolerance.
//!
//! The fetcher is the absorbing boundary for network trouble: a tile either
//! arrives decoded, or it is reported absent. Non-success statuses, timeouts
//! and undecodable payloads are logged and swallowed here; nothing past this
//! module ever sees a per-tile error. A missing tile leaves a blank cell in
//! the composite instead of failing the render.
//!
//! All tiles of one render are requested together and awaited as a batch.
//! There is no retry, no in-flight cap and no cancellation; each request is
//! bounded only by its own timeout.

use std::sync::Arc;

use image::RgbaImage;
use tracing::{debug, warn};

use crate::cache::TileCache;
use crate::coord::{TileCoord, TileRange};
use crate::provider::TileProvider;

/// Fetches, decodes and caches map tiles from a provider.
pub struct TileFetcher<P> {
    provider: P,
    cache: TileCache,
}

impl<P: TileProvider> TileFetcher<P> {
    /// Creates a fetcher with an unbounded per-instance cache.
    pub fn new(provider: P) -> Self {
        Self::with_cache(provider, TileCache::unbounded())
    }

    /// Creates a fetcher with the given cache.
    pub fn with_cache(provider: P, cache: TileCache) -> Self {
        Self { provider, cache }
    }

    /// Retrieve one tile, consulting the cache first.
    ///
    /// Returns `None` on any failure. Concurrent misses for the same key may
    /// fetch the tile twice; both results are identical and the second insert
    /// is a harmless overwrite.
    pub async fn fetch(&self, coord: TileCoord) -> Option<Arc<RgbaImage>> {
        if let Some(tile) = self.cache.get(&coord).await {
            debug!(x = coord.x, y = coord.y, zoom = coord.zoom, "tile cache hit");
            return Some(tile);
        }

        let bytes = match self.provider.fetch_tile(coord.x, coord.y, coord.zoom).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    x = coord.x,
                    y = coord.y,
                    zoom = coord.zoom,
                    provider = self.provider.name(),
                    error = %e,
                    "failed to fetch tile"
                );
                return None;
            }
        };

        match image::load_from_memory(&bytes) {
            Ok(decoded) => {
                let tile = Arc::new(decoded.to_rgba8());
                self.cache.insert(coord, Arc::clone(&tile)).await;
                Some(tile)
            }
            Err(e) => {
                warn!(
                    x = coord.x,
                    y = coord.y,
                    zoom = coord.zoom,
                    error = %e,
                    "failed to decode tile"
                );
                None
            }
        }
    }

    /// Fetch every tile in the range concurrently (fan-out), returning once
    /// all have completed or failed (fan-in).
    ///
    /// The result pairs each coordinate with its outcome in the range's
    /// row-major order, so composition does not depend on completion order.
    pub async fn fetch_range(&self, range: &TileRange) -> Vec<(TileCoord, Option<Arc<RgbaImage>>)> {
        let fetches = range
            .tiles()
            .map(|coord| async move { (coord, self.fetch(coord).await) });
        futures::future::join_all(fetches).await
    }
}
