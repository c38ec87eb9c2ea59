//! Offline top-view preview rendering
//!
//! Draws every extrusion segment of a document as a 2D line into a PNG,
//! auto-fitted to the toolpath's X/Y extent and colored with the same
//! per-layer gradient as the 3D view. Useful for file listings and quick
//! inspection without opening a window.

use crate::error::{Error, Result};
use crate::model::Document;
use crate::render::layer_color;
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;

/// Preview image width in pixels.
pub const PREVIEW_WIDTH: u32 = 800;
/// Preview image height in pixels.
pub const PREVIEW_HEIGHT: u32 = 600;
/// Margin around the toolpath in pixels.
const MARGIN: f64 = 50.0;
/// Preview background.
const BACKGROUND: Rgb<u8> = Rgb([255u8, 255u8, 255u8]);

/// Render a top-view preview of the document's extrusion segments.
///
/// Fails with [`Error::EmptyDocument`] when there is nothing to draw.
pub fn render_preview(document: &Document) -> Result<RgbImage> {
    if document.is_empty() {
        return Err(Error::EmptyDocument);
    }

    let mut img = ImageBuffer::from_pixel(PREVIEW_WIDTH, PREVIEW_HEIGHT, BACKGROUND);

    // X/Y extent over all segment endpoints; Z is projected away.
    let (min, max) = document
        .bounding_box()
        .ok_or(Error::EmptyDocument)?;
    let range = (max.x - min.x).max(max.y - min.y).max(0.001);
    let scale =
        ((PREVIEW_WIDTH as f64 - 2.0 * MARGIN).min(PREVIEW_HEIGHT as f64 - 2.0 * MARGIN)) / range;

    let to_pixel = |x: f64, y: f64| -> (i32, i32) {
        (
            ((x - min.x) * scale + MARGIN) as i32,
            // G-code Y grows away from the operator; image rows grow down.
            (PREVIEW_HEIGHT as f64 - ((y - min.y) * scale + MARGIN)) as i32,
        )
    };

    let total = document.layer_count();
    for (index, layer) in document.layers.iter().enumerate() {
        let (r, g, b) = layer_color(index, total);
        let color = Rgb([(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]);

        for segment in &layer.segments {
            let p1 = to_pixel(segment.start.x, segment.start.y);
            let p2 = to_pixel(segment.end.x, segment.end.y);
            draw_line(&mut img, p1, p2, color);
        }
    }

    Ok(img)
}

/// Render a preview and write it as a PNG.
pub fn export_preview(document: &Document, output_path: &Path) -> Result<()> {
    let img = render_preview(document)?;
    img.save(output_path)?;
    Ok(())
}

/// Draw a line using Bresenham's algorithm.
fn draw_line(img: &mut RgbImage, p1: (i32, i32), p2: (i32, i32), color: Rgb<u8>) {
    let (mut x0, mut y0) = p1;
    let (x1, y1) = p2;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        if x0 >= 0 && x0 < img.width() as i32 && y0 >= 0 && y0 < img.height() as i32 {
            img.put_pixel(x0 as u32, y0 as u32, color);
        }

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}
