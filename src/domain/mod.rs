//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the application.
//! Types here should have no rendering or I/O dependencies so that the
//! classifier and the stroke engine can share them freely.

pub mod geometry;
pub mod gesture;
pub mod landmark;
pub mod stroke;

pub use geometry::*;
pub use gesture::*;
pub use landmark::*;
pub use stroke::*;
