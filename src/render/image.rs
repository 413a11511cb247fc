//! Image rendering for strokes using tiny-skia
//!
//! The canvas is always a full replay of the stroke list onto a white
//! surface. Snapshots are handed out as straight-alpha `RgbaImage`s and
//! encoded to PNG for saving.

use std::io;

use anyhow::Context;
use image::RgbaImage;
use tiny_skia::{BlendMode, Color, Paint, Pixmap, Stroke as LineStyle, Transform};

use super::geometry::{self, BACKGROUND};
use crate::domain::{Stroke, SurfaceSize};

/// Allocate a blank surface of the given size
pub fn new_surface(size: SurfaceSize) -> anyhow::Result<Pixmap> {
    let mut pixmap = Pixmap::new(size.width(), size.height()).with_context(|| {
        format!(
            "Surface of {}x{} pixels is too large",
            size.width(),
            size.height()
        )
    })?;
    fill_background(&mut pixmap);
    Ok(pixmap)
}

fn fill_background(pixmap: &mut Pixmap) {
    let [r, g, b, a] = BACKGROUND;
    pixmap.fill(Color::from_rgba8(r, g, b, a));
}

/// Redraw the whole surface from the stroke list
///
/// Strokes are painted in order; eraser strokes clear the pixels under them,
/// brush strokes paint in their color.
pub fn replay_strokes(pixmap: &mut Pixmap, strokes: &[Stroke]) {
    fill_background(pixmap);
    let Some(size) = SurfaceSize::new(pixmap.width(), pixmap.height()) else {
        return;
    };
    for stroke in strokes {
        draw_stroke(pixmap, stroke, size);
    }
}

/// Draw one stroke with rounded caps and joins
fn draw_stroke(pixmap: &mut Pixmap, stroke: &Stroke, size: SurfaceSize) {
    let Some(path) = geometry::polyline_path(&stroke.points, size) else {
        return;
    };

    let mut paint = Paint::default();
    paint.anti_alias = true;
    if stroke.is_eraser() {
        paint.blend_mode = BlendMode::Clear;
    } else {
        let [r, g, b, a] = stroke.color.to_rgba_u8();
        paint.set_color_rgba8(r, g, b, a);
    }

    let style = LineStyle {
        width: stroke.width as f32,
        line_cap: geometry::LINE_CAP,
        line_join: geometry::LINE_JOIN,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &style, Transform::identity(), None);
}

/// Copy a surface out as a straight-alpha image
pub fn to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Encode an image as PNG into memory
pub fn encode_png(image: &RgbaImage) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, image).context("Failed to encode PNG")?;
    Ok(buffer)
}
