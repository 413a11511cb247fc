//! Stroke types for the drawing canvas
//!
//! All stroke points are stored in normalized surface coordinates so the
//! same strokes replay correctly at any surface size.

use serde::{Deserialize, Serialize};

use super::geometry::Point;
use crate::config::StrokeColor;

/// Drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
}

impl Tool {
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Brush => "brush",
            Tool::Eraser => "eraser",
        }
    }
}

/// Tool, color and width applied to one stroke
///
/// A change in any of the three starts a new stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushSettings {
    pub tool: Tool,
    pub color: StrokeColor,
    /// Line width in surface pixels
    pub width: u32,
}

/// One continuous polyline on the canvas
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Points in normalized surface coordinates, in drawing order
    pub points: Vec<Point>,
    pub color: StrokeColor,
    pub width: u32,
    pub tool: Tool,
}

impl Stroke {
    /// Start a stroke from its first segment
    pub fn new(settings: BrushSettings, from: Point, to: Point) -> Self {
        Self {
            points: vec![from, to],
            color: settings.color,
            width: settings.width,
            tool: settings.tool,
        }
    }

    /// The tool/color/width this stroke was drawn with
    pub fn settings(&self) -> BrushSettings {
        BrushSettings {
            tool: self.tool,
            color: self.color,
            width: self.width,
        }
    }

    /// Whether the stroke removes pixels instead of painting them
    pub fn is_eraser(&self) -> bool {
        self.tool == Tool::Eraser
    }
}
