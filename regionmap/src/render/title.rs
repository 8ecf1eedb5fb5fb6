//! Title band above the map.

use image::{imageops, Rgba, RgbaImage};

use super::font::LabelFont;
use crate::mode::RenderMode;

/// Band and frame fill.
const BAND_COLOR: Rgba<u8> = Rgba([44, 62, 80, 255]);

/// Title text color.
const TITLE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn band_height(mode: RenderMode) -> u32 {
    match mode {
        RenderMode::Detailed => 80,
        RenderMode::Simplified => 60,
    }
}

fn title_px(mode: RenderMode) -> f32 {
    match mode {
        RenderMode::Detailed => 24.0,
        RenderMode::Simplified => 14.0,
    }
}

fn title_top(mode: RenderMode) -> i32 {
    match mode {
        RenderMode::Detailed => 25,
        RenderMode::Simplified => 20,
    }
}

fn title_text(city_name: &str, region_count: usize, mode: RenderMode) -> String {
    match mode {
        RenderMode::Detailed => format!("{city_name} Region Map ({region_count} regions)"),
        RenderMode::Simplified => {
            format!("{city_name} Region Map ({region_count} regions) - Simplified View")
        }
    }
}

/// Prepend the fixed-height title band to the rendered map.
///
/// The returned image is the map grown by the band height, with a centered
/// title naming the city and region count (plus the simplified qualifier
/// where that mode was used).
pub fn add_title_band(
    map: RgbaImage,
    city_name: &str,
    region_count: usize,
    mode: RenderMode,
    font: &LabelFont,
) -> RgbaImage {
    let band = band_height(mode);
    let mut framed = RgbaImage::from_pixel(map.width(), map.height() + band, BAND_COLOR);
    imageops::replace(&mut framed, &map, 0, band as i64);

    let title = title_text(city_name, region_count, mode);
    let px = title_px(mode);
    let (text_w, _) = font.text_size(px, &title);
    let text_x = (map.width() as i64 - text_w as i64) / 2;
    font.draw_text(
        &mut framed,
        TITLE_COLOR,
        text_x as i32,
        title_top(mode),
        px,
        &title,
    );

    framed
}
