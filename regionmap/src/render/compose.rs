//! Base map composition from fetched tiles.

use std::sync::Arc;

use image::{imageops, Rgba, RgbaImage};

use crate::coord::{TileCoord, TileRange};
use crate::mode::{RenderMode, TILE_SIZE};

/// Canvas fill where no tile arrived.
fn background(mode: RenderMode) -> Rgba<u8> {
    match mode {
        RenderMode::Detailed => Rgba([232, 232, 232, 255]),
        RenderMode::Simplified => Rgba([240, 240, 240, 255]),
    }
}

/// Allocate the output canvas and paste every fetched tile at its offset.
///
/// The canvas measures exactly `range.width() × range.height()` tiles.
/// Absent tiles leave the neutral background visible at their cell; partial
/// fetch failure degrades the picture but never changes its dimensions.
pub fn compose_base_map(
    range: &TileRange,
    tiles: &[(TileCoord, Option<Arc<RgbaImage>>)],
    mode: RenderMode,
) -> RgbaImage {
    let width = range.width() * TILE_SIZE;
    let height = range.height() * TILE_SIZE;
    let mut canvas = RgbaImage::from_pixel(width, height, background(mode));

    for (coord, tile) in tiles {
        let Some(tile) = tile else {
            continue;
        };
        // Placement depends only on the tile's index, not fetch order.
        let x = (coord.x - range.min_x) as i64 * TILE_SIZE as i64;
        let y = (coord.y - range.min_y) as i64 * TILE_SIZE as i64;
        imageops::replace(&mut canvas, tile.as_ref(), x, y);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(color: [u8; 4]) -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, Rgba(color)))
    }

    fn range_2x2() -> TileRange {
        TileRange {
            min_x: 40,
            max_x: 41,
            min_y: 20,
            max_y: 21,
            zoom: 11,
        }
    }

    #[test]
    fn test_canvas_dimensions_match_tile_range() {
        let range = range_2x2();
        let tiles: Vec<_> = range.tiles().map(|c| (c, None)).collect();
        let canvas = compose_base_map(&range, &tiles, RenderMode::Detailed);
        assert_eq!(canvas.dimensions(), (512, 512));
    }

    #[test]
    fn test_tiles_are_pasted_at_their_offsets() {
        let range = range_2x2();
        let tiles = vec![
            (TileCoord::new(40, 20, 11), Some(tile([255, 0, 0, 255]))),
            (TileCoord::new(41, 20, 11), Some(tile([0, 255, 0, 255]))),
            (TileCoord::new(40, 21, 11), Some(tile([0, 0, 255, 255]))),
            (TileCoord::new(41, 21, 11), Some(tile([255, 255, 0, 255]))),
        ];
        let canvas = compose_base_map(&range, &tiles, RenderMode::Detailed);

        assert_eq!(canvas.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(256, 0).0, [0, 255, 0, 255]);
        assert_eq!(canvas.get_pixel(0, 256).0, [0, 0, 255, 255]);
        assert_eq!(canvas.get_pixel(256, 256).0, [255, 255, 0, 255]);
    }

    #[test]
    fn test_missing_tiles_keep_background() {
        let range = range_2x2();
        let tiles = vec![
            (TileCoord::new(40, 20, 11), Some(tile([255, 0, 0, 255]))),
            (TileCoord::new(41, 20, 11), None),
            (TileCoord::new(40, 21, 11), None),
            (TileCoord::new(41, 21, 11), None),
        ];
        let canvas = compose_base_map(&range, &tiles, RenderMode::Detailed);

        assert_eq!(canvas.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(256, 0).0, [232, 232, 232, 255]);
        assert_eq!(canvas.get_pixel(256, 256).0, [232, 232, 232, 255]);
    }

    #[test]
    fn test_dimensions_independent_of_failures() {
        let range = range_2x2();
        let none: Vec<_> = range.tiles().map(|c| (c, None)).collect();
        let all: Vec<_> = range
            .tiles()
            .map(|c| (c, Some(tile([1, 2, 3, 255]))))
            .collect();

        let empty_canvas = compose_base_map(&range, &none, RenderMode::Simplified);
        let full_canvas = compose_base_map(&range, &all, RenderMode::Simplified);
        assert_eq!(empty_canvas.dimensions(), full_canvas.dimensions());
    }
}
