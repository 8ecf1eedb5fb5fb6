//! End-to-end map generation.
//!
//! `RegionMapGenerator` wires the pipeline together: validate the request,
//! compute bounds, pick a render mode, fetch the tile range concurrently,
//! composite, draw overlays and the title band, and encode the result. It is
//! the single public entry point of the crate.
//!
//! A generator instance owns its tile cache, so repeated renders of nearby
//! areas reuse downloaded tiles. Instances are safe to share across
//! concurrent renders; two calls racing on the same cache miss fetch the
//! tile twice, which wastes a request but cannot corrupt the result.

use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::coord::{detailed_extent, RegionBounds, TileRange};
use crate::error::MapError;
use crate::fetcher::TileFetcher;
use crate::mode::RenderMode;
use crate::provider::{AsyncReqwestClient, OsmHotProvider, ProviderError, TileProvider};
use crate::region::RegionSet;
use crate::render::{
    add_title_band, compose_base_map, draw_region_overlays, encode_map, LabelFont,
};
use crate::cache::TileCache;

/// Renders city region maps from remote map tiles.
pub struct RegionMapGenerator<P = OsmHotProvider<AsyncReqwestClient>> {
    fetcher: TileFetcher<P>,
    font: LabelFont,
    config: GeneratorConfig,
}

impl RegionMapGenerator {
    /// Creates a generator backed by the OSM HOT tile service.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the HTTP client cannot be constructed.
    pub fn new(config: GeneratorConfig) -> Result<Self, ProviderError> {
        let client = AsyncReqwestClient::new(&config.user_agent, config.request_timeout)?;
        Ok(Self::with_provider(OsmHotProvider::new(client), config))
    }
}

impl<P: TileProvider> RegionMapGenerator<P> {
    /// Creates a generator with a custom tile provider.
    ///
    /// Intended for tests and alternative deployments; the rendering
    /// pipeline is identical.
    pub fn with_provider(provider: P, config: GeneratorConfig) -> Self {
        let cache = match config.max_cached_tiles {
            Some(max_tiles) => TileCache::bounded(max_tiles),
            None => TileCache::unbounded(),
        };
        Self {
            fetcher: TileFetcher::with_cache(provider, cache),
            font: LabelFont::load(),
            config,
        }
    }

    /// Render the map for one city's regions.
    ///
    /// Returns encoded image bytes: PNG for detailed renders, JPEG for
    /// simplified ones. `highlight_region` marks one region by exact name;
    /// a name not present in the set highlights nothing.
    ///
    /// # Errors
    ///
    /// - [`MapError::EmptyRegionSet`] if `regions` is empty (checked before
    ///   any network activity)
    /// - [`MapError::Encoding`] if the final image cannot be serialized
    ///
    /// Tile fetch failures never error; affected cells stay blank.
    pub async fn generate_map(
        &self,
        city_name: &str,
        regions: &RegionSet,
        highlight_region: Option<&str>,
    ) -> Result<Vec<u8>, MapError> {
        let bounds = RegionBounds::from_regions(regions)?;

        let (tile_width, tile_height) = detailed_extent(&bounds);
        let mode = RenderMode::select(tile_width, tile_height);
        match mode {
            RenderMode::Detailed => {
                info!(
                    city = %city_name,
                    tiles_w = tile_width,
                    tiles_h = tile_height,
                    "generating region map"
                );
            }
            RenderMode::Simplified => {
                warn!(
                    city = %city_name,
                    tiles_w = tile_width,
                    tiles_h = tile_height,
                    "map too large for full detail, using simplified view"
                );
            }
        }

        let range = TileRange::for_mode(&bounds, mode);
        let tiles = self.fetcher.fetch_range(&range).await;
        let fetched = tiles.iter().filter(|(_, t)| t.is_some()).count();
        info!(
            fetched,
            total = tiles.len(),
            zoom = range.zoom,
            "tile batch complete"
        );

        let mut canvas = compose_base_map(&range, &tiles, mode);
        draw_region_overlays(
            &mut canvas,
            regions,
            &bounds,
            mode,
            highlight_region,
            &self.font,
        );
        let framed = add_title_band(canvas, city_name, regions.len(), mode, &self.font);

        encode_map(framed, mode, self.config.jpeg_quality)
    }

    /// Blocking wrapper for callers outside an async context.
    ///
    /// Spins up a single-threaded runtime and runs the full pipeline to
    /// completion. Must not be called from within a Tokio runtime.
    pub fn generate_map_blocking(
        &self,
        city_name: &str,
        regions: &RegionSet,
        highlight_region: Option<&str>,
    ) -> Result<Vec<u8>, MapError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| MapError::Runtime(e.to_string()))?;
        runtime.block_on(self.generate_map(city_name, regions, highlight_region))
    }
}
