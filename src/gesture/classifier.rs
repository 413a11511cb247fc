//! Single-frame hand gesture classification
//!
//! Classification is a pure function of one landmark frame. Finger
//! extension is judged from the vertical ordering of each fingertip against
//! its proximal joints, then an ordered rule table picks the gesture. Rules
//! overlap, so the table order is part of the contract.

use crate::domain::{
    Gesture, GestureResult, INDEX_MCP, INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, Landmark,
    MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, Point, RING_PIP, RING_TIP, THUMB_IP, THUMB_MCP,
    THUMB_TIP,
};

/// Thumb and index tips closer than this (normalized units) count as touching
pub const OK_SIGN_TOUCH_DISTANCE: f32 = 0.05;

/// Which fingers are extended in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fingers {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl Fingers {
    /// Evaluate the extension predicates on a complete frame
    ///
    /// Thumb and index compare the tip against two joints, the other
    /// fingers against the PIP joint only.
    pub fn from_landmarks(lm: &[Landmark; LANDMARK_COUNT]) -> Self {
        Self {
            thumb: lm[THUMB_TIP].y < lm[THUMB_IP].y && lm[THUMB_TIP].y < lm[THUMB_MCP].y,
            index: lm[INDEX_TIP].y < lm[INDEX_PIP].y && lm[INDEX_TIP].y < lm[INDEX_MCP].y,
            middle: lm[MIDDLE_TIP].y < lm[MIDDLE_PIP].y,
            ring: lm[RING_TIP].y < lm[RING_PIP].y,
            pinky: lm[PINKY_TIP].y < lm[PINKY_PIP].y,
        }
    }

    pub fn extended_count(&self) -> usize {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .into_iter()
            .filter(|up| *up)
            .count()
    }

    /// Whether exactly the given fingers are extended, in
    /// thumb/index/middle/ring/pinky order
    fn exactly(&self, pattern: [bool; 5]) -> bool {
        [self.thumb, self.index, self.middle, self.ring, self.pinky] == pattern
    }
}

/// Per-frame measurements the rules look at
#[derive(Debug, Clone, Copy)]
struct HandShape {
    fingers: Fingers,
    /// Thumb tip to index tip, in the image plane
    pinch_distance: f32,
}

struct Rule {
    gesture: Gesture,
    confidence: f32,
    matches: fn(&HandShape) -> bool,
}

/// Classification rules, first match wins
const RULES: [Rule; 6] = [
    Rule {
        gesture: Gesture::Point,
        confidence: 0.9,
        matches: |h| h.fingers.exactly([false, true, false, false, false]),
    },
    Rule {
        gesture: Gesture::Peace,
        confidence: 0.85,
        matches: |h| h.fingers.exactly([false, true, true, false, false]),
    },
    Rule {
        gesture: Gesture::Fist,
        confidence: 0.8,
        matches: |h| h.fingers.extended_count() == 0,
    },
    Rule {
        gesture: Gesture::ThumbsUp,
        confidence: 0.8,
        matches: |h| h.fingers.exactly([true, false, false, false, false]),
    },
    Rule {
        gesture: Gesture::OpenPalm,
        confidence: 0.7,
        matches: |h| h.fingers.extended_count() == 5,
    },
    Rule {
        gesture: Gesture::OkSign,
        confidence: 0.8,
        matches: |h| {
            h.pinch_distance < OK_SIGN_TOUCH_DISTANCE
                && h.fingers.middle
                && h.fingers.ring
                && h.fingers.pinky
        },
    },
];

/// Classify one landmark frame
///
/// Anything other than exactly 21 landmarks is treated as "no hand".
pub fn classify(landmarks: &[Landmark]) -> GestureResult {
    let Ok(lm) = <&[Landmark; LANDMARK_COUNT]>::try_from(landmarks) else {
        return GestureResult::NONE;
    };

    let shape = HandShape {
        fingers: Fingers::from_landmarks(lm),
        pinch_distance: lm[THUMB_TIP].xy().distance(lm[INDEX_TIP].xy()),
    };

    let Some(rule) = RULES.iter().find(|rule| (rule.matches)(&shape)) else {
        return GestureResult::NONE;
    };

    // Front-facing cameras are mirrored, flip x back for drawing
    let position = (rule.gesture == Gesture::Point)
        .then(|| Point::new(1.0 - lm[INDEX_TIP].x, lm[INDEX_TIP].y));

    GestureResult {
        gesture: rule.gesture,
        confidence: rule.confidence,
        position,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::*;

    const FINGERS: [(usize, usize, usize, f32); 5] = [
        // (base joint, middle joint, tip, x)
        (THUMB_MCP, THUMB_IP, THUMB_TIP, 0.2),
        (INDEX_MCP, INDEX_PIP, INDEX_TIP, 0.4),
        (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP, 0.5),
        (RING_MCP, RING_PIP, RING_TIP, 0.6),
        (PINKY_MCP, PINKY_PIP, PINKY_TIP, 0.7),
    ];

    /// Synthetic hand with the given fingers extended, in
    /// thumb/index/middle/ring/pinky order
    pub fn hand(extended: [bool; 5]) -> Vec<Landmark> {
        let mut lm = vec![Landmark::default(); LANDMARK_COUNT];
        lm[WRIST] = Landmark::new(0.5, 0.9, 0.0);
        lm[THUMB_CMC] = Landmark::new(0.25, 0.8, 0.0);
        lm[INDEX_DIP] = Landmark::new(0.4, 0.45, 0.0);
        lm[MIDDLE_DIP] = Landmark::new(0.5, 0.45, 0.0);
        lm[RING_DIP] = Landmark::new(0.6, 0.45, 0.0);
        lm[PINKY_DIP] = Landmark::new(0.7, 0.45, 0.0);

        for ((base, joint, tip, x), up) in FINGERS.into_iter().zip(extended) {
            lm[base] = Landmark::new(x, 0.6, 0.0);
            lm[joint] = Landmark::new(x, 0.5, 0.0);
            lm[tip] = Landmark::new(x, if up { 0.3 } else { 0.7 }, 0.0);
        }
        lm
    }

    /// OK sign with the thumb tip `gap` to the right of the index tip
    pub fn ok_sign(gap: f32) -> Vec<Landmark> {
        let mut lm = hand([false, false, true, true, true]);
        // Between PIP and MCP: not extended
        lm[INDEX_TIP] = Landmark::new(0.5, 0.55, 0.0);
        lm[THUMB_TIP] = Landmark::new(0.5 + gap, 0.55, 0.0);
        lm
    }
}
