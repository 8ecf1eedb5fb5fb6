//! Map tile provider abstraction.
//!
//! This module provides the traits and implementation for downloading raster
//! tiles from the remote map provider. The HTTP layer is injected behind
//! [`AsyncHttpClient`] so tests can run against mock clients, and subdomain
//! choice is pluggable via [`SubdomainSelector`] so load spreading stays
//! deterministic under test.

mod http;
mod osm;
mod subdomain;

pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use osm::{OsmHotProvider, TileProvider};
pub use subdomain::{RoundRobinSelector, SubdomainSelector};

use thiserror::Error;

/// Errors from the provider layer.
///
/// These never escape the tile fetcher: a failed tile degrades the composite
/// rather than aborting a render.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Request failed, timed out, or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The requested zoom level is outside the provider's supported range.
    #[error("unsupported zoom level {0}")]
    UnsupportedZoom(u8),
}

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
