//! Generator configuration.

use std::time::Duration;

/// Per-request timeout applied to every tile download.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// JPEG quality used for simplified-mode output.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Configuration for a [`RegionMapGenerator`](crate::RegionMapGenerator).
///
/// The defaults reproduce the standard rendering setup; builder-style
/// `with_*` methods adjust individual knobs.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// User-Agent header sent with tile requests. Public tile servers
    /// require an identifying agent.
    pub user_agent: String,

    /// Timeout applied to each tile request individually.
    pub request_timeout: Duration,

    /// Quality level for lossy (simplified-mode) encoding.
    pub jpeg_quality: u8,

    /// Optional bound on the number of cached tiles. `None` keeps every
    /// fetched tile for the generator's lifetime.
    pub max_cached_tiles: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("regionmap/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_cached_tiles: None,
        }
    }
}

impl GeneratorConfig {
    /// Set the User-Agent header for tile requests.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the JPEG quality for simplified-mode output.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Bound the tile cache to at most `max_tiles` entries.
    pub fn with_cache_limit(mut self, max_tiles: u64) -> Self {
        self.max_cached_tiles = Some(max_tiles);
        self
    }
}
