//! Geometric types for the drawing surface and normalized coordinates

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A point in normalized drawing-surface space, `[0, 1] x [0, 1]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Scale into pixel coordinates of a surface
    pub fn to_pixels(self, size: SurfaceSize) -> (f32, f32) {
        (self.x * size.width() as f32, self.y * size.height() as f32)
    }
}

/// Non-zero pixel dimensions of the drawing surface
///
/// A surface that has not been laid out yet cannot be represented, so every
/// raster operation has a valid target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl SurfaceSize {
    /// Create a surface size, or `None` if either side is zero
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    /// Get the width as u32
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Get the height as u32
    pub fn height(&self) -> u32 {
        self.height.get()
    }
}
