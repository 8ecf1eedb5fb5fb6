//! Library error types.

use thiserror::Error;

/// Errors surfaced by map generation.
///
/// Only input validation and final encoding can fail a render. Per-tile
/// network failures are absorbed inside the fetcher and degrade the output
/// image instead of aborting the call.
#[derive(Debug, Error)]
pub enum MapError {
    /// The supplied region set was empty; bounds cannot be computed.
    #[error("region set is empty")]
    EmptyRegionSet,

    /// The final image could not be serialized.
    #[error("image encoding failed: {0}")]
    Encoding(#[from] image::ImageError),

    /// The blocking wrapper failed to create a Tokio runtime.
    #[error("failed to create runtime: {0}")]
    Runtime(String),
}
