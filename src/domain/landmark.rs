//! Hand landmark types
//!
//! Landmarks follow the 21-point MediaPipe hand model. Coordinates are
//! normalized to camera space, with `y` growing downwards.

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Number of landmarks in a complete hand frame
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// One normalized landmark
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Projection onto the image plane
    pub fn xy(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One frame pushed by a hand tracker
///
/// An empty landmark list means no hand was detected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Frame time in milliseconds (source clock)
    pub timestamp_ms: u64,
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

impl FrameInput {
    /// Whether the frame carries a complete hand
    pub fn has_hand(&self) -> bool {
        self.landmarks.len() == LANDMARK_COUNT
    }
}
