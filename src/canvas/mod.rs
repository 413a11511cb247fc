//! Drawing canvas: stroke list and its raster

pub mod engine;

pub use engine::StrokeEngine;
