//! Coordinate conversion between region grid units and provider tile units.
//!
//! Regions live on an integer grid at a fixed base granularity. At detailed
//! zoom one region spans a [`REGION_TILE_SPAN`]×[`REGION_TILE_SPAN`] block of
//! tiles; at simplified zoom the same factor works in the other direction and
//! several regions share one tile. All conversions here are pure math with no
//! I/O, computed fresh per render call.

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::mode::{RenderMode, REGION_TILE_SPAN};
use crate::region::RegionSet;

/// Position of a region on the city grid.
///
/// Serialized as a two-element array, matching region database records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct RegionCoord {
    pub x: i32,
    pub y: i32,
}

impl RegionCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for RegionCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<RegionCoord> for (i32, i32) {
    fn from(coord: RegionCoord) -> Self {
        (coord.x, coord.y)
    }
}

/// Address of one provider tile. Used as the fetch cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
    pub zoom: u8,
}

impl TileCoord {
    pub fn new(x: i32, y: i32, zoom: u8) -> Self {
        Self { x, y, zoom }
    }
}

/// Minimal axis-aligned rectangle covering all regions of a request,
/// in region grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl RegionBounds {
    /// Compute the bounding box of a region set in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyRegionSet`] if the set is empty. This is the
    /// fail-fast validation of the pipeline and happens before any network
    /// activity.
    pub fn from_regions(regions: &RegionSet) -> Result<Self, MapError> {
        let mut coords = regions.values().map(|r| r.coords);
        let first = coords.next().ok_or(MapError::EmptyRegionSet)?;

        let mut bounds = RegionBounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for c in coords {
            bounds.min_x = bounds.min_x.min(c.x);
            bounds.max_x = bounds.max_x.max(c.x);
            bounds.min_y = bounds.min_y.min(c.y);
            bounds.max_y = bounds.max_y.max(c.y);
        }
        Ok(bounds)
    }

    /// Number of region columns covered by the box.
    pub fn width_regions(&self) -> u32 {
        (self.max_x as i64 - self.min_x as i64 + 1) as u32
    }

    /// Number of region rows covered by the box.
    pub fn height_regions(&self) -> u32 {
        (self.max_y as i64 - self.min_y as i64 + 1) as u32
    }

    pub fn contains(&self, coord: RegionCoord) -> bool {
        (self.min_x..=self.max_x).contains(&coord.x) && (self.min_y..=self.max_y).contains(&coord.y)
    }
}

/// Tile extent of a bounding box under the detailed-mode assumption.
///
/// This feeds mode selection: the request is sized as if it were rendered at
/// full detail, and the simplified path is taken only when that extent is
/// too large.
pub fn detailed_extent(bounds: &RegionBounds) -> (u32, u32) {
    let span = REGION_TILE_SPAN as u32;
    (
        bounds.width_regions() * span,
        bounds.height_regions() * span,
    )
}

/// Inclusive range of tile indices needed for one render, at the mode's zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub zoom: u8,
}

impl TileRange {
    /// Map region bounds onto tile indices for the given mode.
    ///
    /// Detailed mode expands each region into its 4×4 tile block, so the
    /// range covers `[min*4, (max+1)*4 - 1]` per axis. Simplified mode
    /// divides region coordinates down to the coarser grid (floor division),
    /// producing a much smaller range for the same span.
    pub fn for_mode(bounds: &RegionBounds, mode: RenderMode) -> Self {
        let s = REGION_TILE_SPAN;
        match mode {
            RenderMode::Detailed => TileRange {
                min_x: bounds.min_x * s,
                max_x: (bounds.max_x + 1) * s - 1,
                min_y: bounds.min_y * s,
                max_y: (bounds.max_y + 1) * s - 1,
                zoom: mode.zoom(),
            },
            RenderMode::Simplified => TileRange {
                min_x: bounds.min_x.div_euclid(s),
                max_x: bounds.max_x.div_euclid(s),
                min_y: bounds.min_y.div_euclid(s),
                max_y: bounds.max_y.div_euclid(s),
                zoom: mode.zoom(),
            },
        }
    }

    /// Range width in tiles.
    pub fn width(&self) -> u32 {
        (self.max_x as i64 - self.min_x as i64 + 1) as u32
    }

    /// Range height in tiles.
    pub fn height(&self) -> u32 {
        (self.max_y as i64 - self.min_y as i64 + 1) as u32
    }

    /// Total number of tiles in the range.
    pub fn tile_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Iterate all tile coordinates in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = TileCoord> {
        let TileRange {
            min_x,
            max_x,
            min_y,
            max_y,
            zoom,
        } = *self;
        (min_y..=max_y).flat_map(move |y| (min_x..=max_x).map(move |x| TileCoord { x, y, zoom }))
    }
}

/// Square pixel area of one region on the output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// Pixel rectangle of a region relative to the canvas origin.
///
/// The caller must pass a coordinate inside `bounds`; the top-left corner is
/// `(rx - min_x, ry - min_y)` scaled by the mode's cell size.
pub fn region_pixel_rect(coord: RegionCoord, bounds: &RegionBounds, mode: RenderMode) -> PixelRect {
    let cell = mode.cell_size();
    PixelRect {
        x: (coord.x - bounds.min_x) as u32 * cell,
        y: (coord.y - bounds.min_y) as u32 * cell,
        size: cell,
    }
}
