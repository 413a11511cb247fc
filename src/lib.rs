//! Air Canvas - draw in mid-air with hand gestures
//!
//! Landmark frames from a hand tracker are classified into gestures, which
//! either trigger tool actions or extend strokes on a raster canvas.

pub mod canvas;
pub mod capture;
pub mod config;
pub mod domain;
pub mod export;
pub mod gallery;
pub mod gesture;
pub mod render;
pub mod session;
