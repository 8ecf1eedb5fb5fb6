//! Raster rendering pipeline stages.
//!
//! ```text
//! fetched tiles ──► compose ──► overlay ──► title ──► encode ──► bytes
//!                  (base map)  (region     (band)
//!                              boxes +
//!                              labels)
//! ```
//!
//! Every stage mutates one RGBA canvas in place; the canvas lives for a
//! single render call and is consumed by [`encode_map`].

pub mod compose;
pub mod font;
pub mod overlay;
pub mod title;

pub use compose::compose_base_map;
pub use font::LabelFont;
pub use overlay::draw_region_overlays;
pub use title::add_title_band;

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Pixel, Rgba, RgbaImage};

use crate::error::MapError;
use crate::mode::RenderMode;

/// Alpha-blend a single pixel onto the canvas, ignoring out-of-bounds
/// coordinates.
pub(crate) fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    pixel.blend(&color);
}

/// Serialize the finished canvas.
///
/// Detailed renders encode losslessly as PNG; simplified renders use JPEG at
/// the configured quality to keep large-area output small. Both are written
/// as RGB.
///
/// # Errors
///
/// Returns [`MapError::Encoding`] if serialization fails. This is the only
/// post-validation failure that surfaces to the caller.
pub fn encode_map(image: RgbaImage, mode: RenderMode, jpeg_quality: u8) -> Result<Vec<u8>, MapError> {
    let rgb = DynamicImage::ImageRgba8(image).into_rgb8();
    let mut buf = Cursor::new(Vec::new());
    match mode {
        RenderMode::Detailed => {
            rgb.write_to(&mut buf, image::ImageFormat::Png)?;
        }
        RenderMode::Simplified => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, jpeg_quality);
            rgb.write_with_encoder(encoder)?;
        }
    }
    Ok(buf.into_inner())
}
