//! Gesture labels produced by the classifier

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Discrete hand gesture recognized from a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    #[default]
    None,
    /// Index finger extended, others curled
    Point,
    /// Index and middle fingers extended
    Peace,
    /// No finger extended
    Fist,
    /// Only the thumb extended
    ThumbsUp,
    /// All five fingers extended
    OpenPalm,
    /// Thumb and index tips touching, other fingers extended
    OkSign,
}

impl Gesture {
    /// Stable string form, used for logs and the `classify` command output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Point => "point",
            Self::Peace => "peace",
            Self::Fist => "fist",
            Self::ThumbsUp => "thumbs_up",
            Self::OpenPalm => "open_palm",
            Self::OkSign => "ok_sign",
        }
    }

    /// What the gesture does in the drawing session
    pub fn description(&self) -> &'static str {
        match self {
            Self::None => "No gesture",
            Self::Point => "Index finger up to draw",
            Self::Peace => "Two fingers for eraser mode",
            Self::Fist => "Closed fist",
            Self::ThumbsUp => "Thumb up to cycle colors",
            Self::OpenPalm => "Open palm to pause drawing",
            Self::OkSign => "OK sign to clear entire drawing",
        }
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classification of one frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureResult {
    pub gesture: Gesture,
    /// Confidence in `[0, 1]`
    pub confidence: f32,
    /// Mirrored index fingertip, only set for [`Gesture::Point`]
    pub position: Option<Point>,
}

impl GestureResult {
    /// The "no hand / no gesture" result
    pub const NONE: Self = Self {
        gesture: Gesture::None,
        confidence: 0.0,
        position: None,
    };
}
