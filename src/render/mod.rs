//! Stroke rendering module
//!
//! This module contains:
//! - Stroke geometry shared by the rasterizer (path building, constants)
//! - Image rendering using tiny-skia and PNG encoding

pub mod geometry;
pub mod image;
