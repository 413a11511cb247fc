//! Gesture-to-action mapping with a global cooldown
//!
//! Per-frame classification is noisy, so at most one action fires per
//! cooldown window across all gestures.

use crate::domain::{Gesture, GestureResult, Tool};

/// Action requested by a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAction {
    /// Switch to the given tool
    SelectTool(Tool),
    /// Advance to the next palette color
    NextColor,
    /// Remove every stroke
    Clear,
}

/// Rate-limits gesture actions to one per window
#[derive(Debug, Clone)]
pub struct GestureDebouncer {
    window_ms: u64,
    min_confidence: f32,
    /// Time of the last action that fired, `None` before the first one
    last_action_ms: Option<u64>,
}

impl GestureDebouncer {
    pub fn new(window_ms: u64, min_confidence: f32) -> Self {
        Self {
            window_ms,
            min_confidence,
            last_action_ms: None,
        }
    }

    /// Map a classified frame to an action, if one is due
    ///
    /// Tool switches to the tool already in use are no-ops and leave the
    /// cooldown untouched. Color cycling and clearing always fire.
    pub fn process(
        &mut self,
        result: &GestureResult,
        current_tool: Tool,
        now_ms: u64,
    ) -> Option<GestureAction> {
        if self.cooling_down(now_ms) || result.confidence <= self.min_confidence {
            return None;
        }

        let action = match result.gesture {
            Gesture::Peace if current_tool != Tool::Eraser => GestureAction::SelectTool(Tool::Eraser),
            Gesture::Point if current_tool != Tool::Brush => GestureAction::SelectTool(Tool::Brush),
            Gesture::ThumbsUp => GestureAction::NextColor,
            Gesture::OkSign => GestureAction::Clear,
            _ => return None,
        };

        log::debug!("Gesture {} triggered {:?}", result.gesture, action);
        self.last_action_ms = Some(now_ms);
        Some(action)
    }

    /// Whether the last action is still inside the window
    ///
    /// A clock that went backwards counts as no time elapsed.
    fn cooling_down(&self, now_ms: u64) -> bool {
        self.last_action_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.window_ms)
    }
}

impl Default for GestureDebouncer {
    fn default() -> Self {
        Self::new(1000, 0.7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(gesture: Gesture, confidence: f32) -> GestureResult {
        GestureResult {
            gesture,
            confidence,
            position: None,
        }
    }

    #[test]
    fn test_second_event_inside_window_is_dropped() {
        let mut debouncer = GestureDebouncer::default();
        let thumbs = result(Gesture::ThumbsUp, 0.8);
        assert_eq!(
            debouncer.process(&thumbs, Tool::Brush, 10_000),
            Some(GestureAction::NextColor)
        );
        assert_eq!(debouncer.process(&thumbs, Tool::Brush, 10_500), None);
    }

    #[test]
    fn test_events_outside_window_both_fire() {
        let mut debouncer = GestureDebouncer::default();
        let thumbs = result(Gesture::ThumbsUp, 0.8);
        assert!(debouncer.process(&thumbs, Tool::Brush, 10_000).is_some());
        assert!(debouncer.process(&thumbs, Tool::Brush, 11_001).is_some());
    }

    #[test]
    fn test_low_confidence_ignored() {
        let mut debouncer = GestureDebouncer::default();
        // The threshold itself does not qualify
        assert_eq!(
            debouncer.process(&result(Gesture::ThumbsUp, 0.7), Tool::Brush, 0),
            None
        );
        assert_eq!(
            debouncer.process(&result(Gesture::OpenPalm, 0.7), Tool::Brush, 0),
            None
        );
    }

    #[test]
    fn test_tool_switch_is_idempotent_and_keeps_timer() {
        let mut debouncer = GestureDebouncer::default();
        let peace = result(Gesture::Peace, 0.85);
        assert_eq!(debouncer.process(&peace, Tool::Eraser, 1_000), None);
        // The no-op did not start a cooldown
        assert_eq!(
            debouncer.process(&result(Gesture::ThumbsUp, 0.8), Tool::Eraser, 1_100),
            Some(GestureAction::NextColor)
        );
    }

    #[test]
    fn test_gesture_mapping() {
        let cases = [
            (Gesture::Peace, 0.85, Tool::Brush, Some(GestureAction::SelectTool(Tool::Eraser))),
            (Gesture::Point, 0.9, Tool::Eraser, Some(GestureAction::SelectTool(Tool::Brush))),
            (Gesture::Point, 0.9, Tool::Brush, None),
            (Gesture::OkSign, 0.8, Tool::Brush, Some(GestureAction::Clear)),
            (Gesture::Fist, 0.8, Tool::Brush, None),
            (Gesture::None, 0.0, Tool::Brush, None),
        ];
        for (gesture, confidence, tool, expected) in cases {
            let mut debouncer = GestureDebouncer::default();
            assert_eq!(
                debouncer.process(&result(gesture, confidence), tool, 0),
                expected,
                "{gesture} with {tool:?}"
            );
        }
    }

    #[test]
    fn test_clock_going_backwards_is_suppressed() {
        let mut debouncer = GestureDebouncer::default();
        let thumbs = result(Gesture::ThumbsUp, 0.8);
        assert!(debouncer.process(&thumbs, Tool::Brush, 5_000).is_some());
        assert_eq!(debouncer.process(&thumbs, Tool::Brush, 4_000), None);
    }
}
