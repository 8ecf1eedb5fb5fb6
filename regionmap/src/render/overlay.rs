//! Region box and label drawing.
//!
//! Each region gets a translucent fill, a solid inward border and a centered
//! `"#<n>"` label. The highlighted region, matched by exact name, swaps to a
//! warm color pair with a thicker border; a highlight name that matches
//! nothing simply highlights nothing.
//!
//! Label legibility comes from a stroke-then-fill pass: the text is drawn
//! once per offset in the 8 neighboring pixel directions in white, then once
//! more in the label color at the exact center.

use image::{Rgba, RgbaImage};

use super::blend_pixel;
use super::font::LabelFont;
use crate::coord::{region_pixel_rect, PixelRect, RegionBounds};
use crate::mode::RenderMode;
use crate::region::{label_for, RegionSet};

/// Stroke color of the label outline pass.
const LABEL_OUTLINE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Visual treatment of one region box.
struct RegionStyle {
    fill: Rgba<u8>,
    border: Rgba<u8>,
    border_width: u32,
    label: Rgba<u8>,
    label_px: f32,
    outline_offset: i64,
}

fn region_style(mode: RenderMode, highlighted: bool) -> RegionStyle {
    match (mode, highlighted) {
        (RenderMode::Detailed, true) => RegionStyle {
            fill: Rgba([255, 215, 0, 100]),
            border: Rgba([255, 165, 0, 255]),
            border_width: 8,
            label: Rgba([255, 140, 0, 255]),
            label_px: 48.0,
            outline_offset: 2,
        },
        (RenderMode::Detailed, false) => RegionStyle {
            fill: Rgba([100, 149, 237, 60]),
            border: Rgba([70, 130, 220, 200]),
            border_width: 4,
            label: Rgba([0, 0, 139, 255]),
            label_px: 48.0,
            outline_offset: 2,
        },
        (RenderMode::Simplified, true) => RegionStyle {
            fill: Rgba([255, 215, 0, 100]),
            border: Rgba([255, 140, 0, 200]),
            border_width: 2,
            label: Rgba([255, 100, 0, 255]),
            label_px: 14.0,
            outline_offset: 1,
        },
        (RenderMode::Simplified, false) => RegionStyle {
            fill: Rgba([100, 149, 237, 50]),
            border: Rgba([70, 130, 220, 150]),
            border_width: 2,
            label: Rgba([0, 0, 139, 255]),
            label_px: 14.0,
            outline_offset: 1,
        },
    }
}

/// Alpha-blend a filled rectangle, clipped to the canvas.
fn fill_rect(canvas: &mut RgbaImage, rect: &PixelRect, color: Rgba<u8>) {
    for dy in 0..rect.size as i64 {
        for dx in 0..rect.size as i64 {
            blend_pixel(canvas, rect.x as i64 + dx, rect.y as i64 + dy, color);
        }
    }
}

/// Alpha-blend a rectangle outline of the given width, drawn inward from the
/// rect edge.
fn stroke_rect(canvas: &mut RgbaImage, rect: &PixelRect, color: Rgba<u8>, width: u32) {
    let x0 = rect.x as i64;
    let y0 = rect.y as i64;
    let size = rect.size as i64;
    for inset in 0..width.min(rect.size / 2 + 1) as i64 {
        let left = x0 + inset;
        let right = x0 + size - 1 - inset;
        let top = y0 + inset;
        let bottom = y0 + size - 1 - inset;
        for x in left..=right {
            blend_pixel(canvas, x, top, color);
            blend_pixel(canvas, x, bottom, color);
        }
        for y in (top + 1)..bottom {
            blend_pixel(canvas, left, y, color);
            blend_pixel(canvas, right, y, color);
        }
    }
}

/// Draw every region of the set onto the composed base map.
pub fn draw_region_overlays(
    canvas: &mut RgbaImage,
    regions: &RegionSet,
    bounds: &RegionBounds,
    mode: RenderMode,
    highlight_region: Option<&str>,
    font: &LabelFont,
) {
    for (name, region) in regions {
        let rect = region_pixel_rect(region.coords, bounds, mode);
        let highlighted = highlight_region == Some(name.as_str());
        let style = region_style(mode, highlighted);

        fill_rect(canvas, &rect, style.fill);
        stroke_rect(canvas, &rect, style.border, style.border_width);

        let label = label_for(name);
        let (text_w, text_h) = font.text_size(style.label_px, &label);
        let text_x = rect.x as i64 + (rect.size as i64 - text_w as i64) / 2;
        let text_y = rect.y as i64 + (rect.size as i64 - text_h as i64) / 2;

        for dx in [-style.outline_offset, 0, style.outline_offset] {
            for dy in [-style.outline_offset, 0, style.outline_offset] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                font.draw_text(
                    canvas,
                    LABEL_OUTLINE_COLOR,
                    (text_x + dx) as i32,
                    (text_y + dy) as i32,
                    style.label_px,
                    &label,
                );
            }
        }
        font.draw_text(
            canvas,
            style.label,
            text_x as i32,
            text_y as i32,
            style.label_px,
            &label,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::RegionCoord;
    use crate::region::Region;

    fn one_region(name: &str, x: i32, y: i32) -> RegionSet {
        let mut set = RegionSet::new();
        set.insert(name.to_string(), Region::new(RegionCoord::new(x, y)));
        set
    }

    #[test]
    fn test_highlight_style_differs_from_normal() {
        for mode in [RenderMode::Detailed, RenderMode::Simplified] {
            let normal = region_style(mode, false);
            let highlighted = region_style(mode, true);
            assert_ne!(normal.fill, highlighted.fill);
            assert_ne!(normal.border, highlighted.border);
            assert!(highlighted.border_width >= normal.border_width);
        }
    }

    #[test]
    fn test_detailed_highlight_border_is_thicker() {
        assert_eq!(region_style(RenderMode::Detailed, true).border_width, 8);
        assert_eq!(region_style(RenderMode::Detailed, false).border_width, 4);
    }

    #[test]
    fn test_fill_rect_blends_over_background() {
        let mut canvas = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let rect = PixelRect { x: 2, y: 2, size: 4 };
        fill_rect(&mut canvas, &rect, Rgba([255, 255, 255, 128]));

        // Inside: roughly half-way to white. Outside: untouched.
        assert!(canvas.get_pixel(3, 3).0[0] > 100);
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(7, 7).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_stroke_rect_covers_border_width() {
        let mut canvas = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
        let rect = PixelRect { x: 0, y: 0, size: 16 };
        stroke_rect(&mut canvas, &rect, Rgba([255, 0, 0, 255]), 3);

        assert_eq!(canvas.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(2, 0).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(0, 2).0, [255, 0, 0, 255]);
        // Center stays clear.
        assert_eq!(canvas.get_pixel(8, 8).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_overlay_marks_region_cell() {
        let regions = one_region("Akita#6", 3, 4);
        let bounds = RegionBounds {
            min_x: 3,
            max_x: 3,
            min_y: 4,
            max_y: 4,
        };
        let mut canvas = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));
        let before = canvas.clone();

        draw_region_overlays(
            &mut canvas,
            &regions,
            &bounds,
            RenderMode::Simplified,
            None,
            &LabelFont::Bitmap,
        );
        assert_ne!(canvas, before);
    }

    #[test]
    fn test_unknown_highlight_matches_no_highlight() {
        let regions = one_region("Akita#6", 0, 0);
        let bounds = RegionBounds {
            min_x: 0,
            max_x: 0,
            min_y: 0,
            max_y: 0,
        };
        let font = LabelFont::Bitmap;

        let mut plain = RgbaImage::from_pixel(64, 64, Rgba([50, 50, 50, 255]));
        draw_region_overlays(
            &mut plain,
            &regions,
            &bounds,
            RenderMode::Simplified,
            None,
            &font,
        );

        let mut unknown = RgbaImage::from_pixel(64, 64, Rgba([50, 50, 50, 255]));
        draw_region_overlays(
            &mut unknown,
            &regions,
            &bounds,
            RenderMode::Simplified,
            Some("Akita#999"),
            &font,
        );

        assert_eq!(plain, unknown);
    }

    #[test]
    fn test_exact_name_match_changes_output() {
        let regions = one_region("Akita#6", 0, 0);
        let bounds = RegionBounds {
            min_x: 0,
            max_x: 0,
            min_y: 0,
            max_y: 0,
        };
        let font = LabelFont::Bitmap;

        let mut plain = RgbaImage::from_pixel(64, 64, Rgba([50, 50, 50, 255]));
        draw_region_overlays(
            &mut plain,
            &regions,
            &bounds,
            RenderMode::Simplified,
            None,
            &font,
        );

        let mut highlighted = RgbaImage::from_pixel(64, 64, Rgba([50, 50, 50, 255]));
        draw_region_overlays(
            &mut highlighted,
            &regions,
            &bounds,
            RenderMode::Simplified,
            Some("Akita#6"),
            &font,
        );

        assert_ne!(plain, highlighted);
    }
}
