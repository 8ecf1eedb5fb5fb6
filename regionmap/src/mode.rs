//! Render mode selection.
//!
//! A render is either `Detailed` (full tile resolution, one region spans a
//! 4×4 block of zoom-11 tiles) or `Simplified` (zoom-7 tiles, one region
//! collapses to a 64 px cell). The mode is chosen once per render from the
//! tile dimensions the request would have at full detail, trading visual
//! fidelity against bounded fetch count and output size.

/// Edge length of a provider tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Number of detailed-zoom tiles spanned by one region along each axis.
///
/// The same factor maps region coordinates onto simplified-zoom tile
/// indices (`tile = region / 4`, floor division).
pub const REGION_TILE_SPAN: i32 = 4;

/// Largest tile extent (per axis) rendered at full detail.
///
/// Requests wider or taller than this fall back to the simplified view.
pub const MAX_DETAILED_TILES: u32 = 32;

/// Zoom level used for detailed renders.
pub const DETAILED_ZOOM: u8 = 11;

/// Zoom level used for simplified renders.
pub const SIMPLIFIED_ZOOM: u8 = 7;

/// Rendering strategy for one map request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Full fidelity: zoom 11, 1024 px per region, lossless output.
    Detailed,
    /// Size-bounded fallback: zoom 7, 64 px per region, lossy output.
    Simplified,
}

impl RenderMode {
    /// Select the mode from the tile extent the request would have at full
    /// detail. Both axes must fit within [`MAX_DETAILED_TILES`]; there is no
    /// intermediate tier.
    pub fn select(tile_width: u32, tile_height: u32) -> Self {
        if tile_width <= MAX_DETAILED_TILES && tile_height <= MAX_DETAILED_TILES {
            RenderMode::Detailed
        } else {
            RenderMode::Simplified
        }
    }

    /// Provider zoom level fetched in this mode.
    pub fn zoom(self) -> u8 {
        match self {
            RenderMode::Detailed => DETAILED_ZOOM,
            RenderMode::Simplified => SIMPLIFIED_ZOOM,
        }
    }

    /// Edge length in pixels of one region cell on the output canvas.
    pub fn cell_size(self) -> u32 {
        match self {
            // One region covers a 4×4 tile block.
            RenderMode::Detailed => TILE_SIZE * REGION_TILE_SPAN as u32,
            // Four regions share one tile along each axis.
            RenderMode::Simplified => TILE_SIZE / REGION_TILE_SPAN as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_extent_is_detailed() {
        assert_eq!(RenderMode::select(8, 4), RenderMode::Detailed);
        assert_eq!(RenderMode::select(1, 1), RenderMode::Detailed);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // Exactly 32×32 still renders at full detail.
        assert_eq!(RenderMode::select(32, 32), RenderMode::Detailed);
    }

    #[test]
    fn test_either_axis_over_threshold_is_simplified() {
        assert_eq!(RenderMode::select(33, 32), RenderMode::Simplified);
        assert_eq!(RenderMode::select(32, 33), RenderMode::Simplified);
        assert_eq!(RenderMode::select(100, 1), RenderMode::Simplified);
    }

    #[test]
    fn test_zoom_per_mode() {
        assert_eq!(RenderMode::Detailed.zoom(), 11);
        assert_eq!(RenderMode::Simplified.zoom(), 7);
    }

    #[test]
    fn test_cell_size_per_mode() {
        assert_eq!(RenderMode::Detailed.cell_size(), 1024);
        assert_eq!(RenderMode::Simplified.cell_size(), 64);
    }
}
