//! Gesture recognition and gesture-driven actions
//!
//! This module provides:
//! - The single-frame classifier (landmarks -> gesture)
//! - The debouncer that turns gestures into tool/color/clear actions

pub mod classifier;
pub mod debounce;

pub use classifier::classify;
pub use debounce::{GestureAction, GestureDebouncer};
