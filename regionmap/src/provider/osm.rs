//! OSM France HOT tile provider.
//!
//! Serves the Humanitarian OpenStreetMap Team raster basemap, operated by
//! OpenStreetMap France. No authentication is required.
//!
//! # URL Pattern
//!
//! `https://{subdomain}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png`
//!
//! - Standard XYZ tile coordinates (x=column west to east, y=row north to
//!   south)
//! - Subdomains `a`, `b`, `c` are equivalent mirrors; requests are spread
//!   across them

use tracing::trace;

use super::subdomain::{RoundRobinSelector, SubdomainSelector};
use super::{AsyncHttpClient, ProviderError};

/// Host serving the HOT basemap.
const OSM_HOT_HOST: &str = "tile.openstreetmap.fr";

/// Equivalent mirror subdomains.
const SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Minimum zoom level served by the HOT layer.
const MIN_ZOOM: u8 = 0;

/// Maximum zoom level served by the HOT layer.
const MAX_ZOOM: u8 = 20;

/// Trait for tile download strategies.
///
/// Abstracts the remote tile source so the fetcher can run against mock
/// providers in tests.
#[allow(async_fn_in_trait)]
pub trait TileProvider: Send + Sync {
    /// Download one tile as raw encoded image bytes.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the zoom level is unsupported or the
    /// request fails.
    async fn fetch_tile(&self, x: i32, y: i32, zoom: u8) -> Result<Vec<u8>, ProviderError>;

    /// Human-readable provider name for logs.
    fn name(&self) -> &str;

    fn min_zoom(&self) -> u8;

    fn max_zoom(&self) -> u8;

    fn supports_zoom(&self, zoom: u8) -> bool {
        (self.min_zoom()..=self.max_zoom()).contains(&zoom)
    }
}

/// OSM France HOT raster tile provider.
pub struct OsmHotProvider<C: AsyncHttpClient, S: SubdomainSelector = RoundRobinSelector> {
    http_client: C,
    selector: S,
}

impl<C: AsyncHttpClient> OsmHotProvider<C> {
    /// Creates a provider spreading requests round-robin over the mirror
    /// subdomains.
    pub fn new(http_client: C) -> Self {
        Self {
            http_client,
            selector: RoundRobinSelector::new(),
        }
    }
}

impl<C: AsyncHttpClient, S: SubdomainSelector> OsmHotProvider<C, S> {
    /// Creates a provider with a custom subdomain selector.
    pub fn with_selector(http_client: C, selector: S) -> Self {
        Self {
            http_client,
            selector,
        }
    }

    /// Builds the tile URL for the given coordinates.
    fn build_url(&self, x: i32, y: i32, zoom: u8) -> String {
        let subdomain = SUBDOMAINS[self.selector.next(SUBDOMAINS.len())];
        format!("https://{subdomain}.{OSM_HOT_HOST}/hot/{zoom}/{x}/{y}.png")
    }
}

impl<C: AsyncHttpClient, S: SubdomainSelector> TileProvider for OsmHotProvider<C, S> {
    async fn fetch_tile(&self, x: i32, y: i32, zoom: u8) -> Result<Vec<u8>, ProviderError> {
        if !self.supports_zoom(zoom) {
            return Err(ProviderError::UnsupportedZoom(zoom));
        }

        let url = self.build_url(x, y, zoom);
        trace!(%url, "requesting tile");
        self.http_client.get(&url).await
    }

    fn name(&self) -> &str {
        "OSM HOT"
    }

    fn min_zoom(&self) -> u8 {
        MIN_ZOOM
    }

    fn max_zoom(&self) -> u8 {
        MAX_ZOOM
    }
}
