//! Stroke geometry for the rasterizer
//!
//! Strokes are stored in normalized coordinates and scaled to the surface
//! when a path is built.

use tiny_skia::{LineCap, LineJoin, PathBuilder};

use crate::domain::{Point, SurfaceSize};

/// Canvas background, opaque white
pub const BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// Cap and join used for every stroke
pub const LINE_CAP: LineCap = LineCap::Round;
pub const LINE_JOIN: LineJoin = LineJoin::Round;

/// Build a polyline path through `points`, scaled to the surface
///
/// Returns `None` for fewer than two points, which have nothing to stroke.
pub fn polyline_path(points: &[Point], size: SurfaceSize) -> Option<tiny_skia::Path> {
    let [first, rest @ ..] = points else {
        return None;
    };
    if rest.is_empty() {
        return None;
    }

    let mut pb = PathBuilder::new();
    let (x, y) = first.to_pixels(size);
    pb.move_to(x, y);
    for point in rest {
        let (x, y) = point.to_pixels(size);
        pb.line_to(x, y);
    }
    pb.finish()
}
