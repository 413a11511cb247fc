//! Drawing session management module
//!
//! This module contains:
//! - Tool state (tool, palette color, brush width)
//! - The per-frame pipeline: classify, debounce actions, feed the canvas

pub mod state;

use image::RgbaImage;

use crate::canvas::StrokeEngine;
use crate::capture::FrameSource;
use crate::config::{AirCanvasConfig, StrokeColor};
use crate::domain::{FrameInput, Gesture, GestureResult, Landmark, SurfaceSize, Tool};
use crate::gesture::{self, GestureAction, GestureDebouncer};
use state::ToolState;

/// What one frame did
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutcome {
    pub result: GestureResult,
    /// Action fired by this frame's gesture, if any
    pub action: Option<GestureAction>,
    /// Whether the frame drew on the canvas
    pub drawing: bool,
}

/// A single-hand drawing session
///
/// Frames are processed synchronously, one at a time. The session is the
/// only writer of the current gesture, tool state and canvas.
pub struct Session {
    tools: ToolState,
    debouncer: GestureDebouncer,
    engine: StrokeEngine,
    draw_confidence: f32,
    current: GestureResult,
    running: bool,
}

impl Session {
    pub fn new(config: &AirCanvasConfig) -> anyhow::Result<Self> {
        let size = SurfaceSize::new(config.canvas_width, config.canvas_height)
            .ok_or_else(|| anyhow::anyhow!("Canvas size must be non-zero"))?;
        Ok(Self {
            tools: ToolState::new(config.palette_index, config.brush_width),
            debouncer: GestureDebouncer::new(config.debounce_ms, config.action_confidence),
            engine: StrokeEngine::new(size)?,
            draw_confidence: config.draw_confidence,
            current: GestureResult::NONE,
            running: true,
        })
    }

    /// Process one landmark frame
    ///
    /// Returns `None` while the session is stopped; the frame is then not
    /// classified at all.
    pub fn on_frame(&mut self, landmarks: &[Landmark], now_ms: u64) -> Option<FrameOutcome> {
        if !self.running {
            return None;
        }

        let result = gesture::classify(landmarks);
        self.current = result;

        let action = self.debouncer.process(&result, self.tools.tool, now_ms);
        if let Some(action) = action {
            self.apply(action);
        }

        let drawing = result.gesture == Gesture::Point && result.confidence > self.draw_confidence;
        self.engine
            .update(drawing, result.position, self.tools.brush_settings());

        Some(FrameOutcome {
            result,
            action,
            drawing,
        })
    }

    /// Process a frame pushed by a [`FrameSource`]
    pub fn handle_frame(&mut self, frame: &FrameInput) -> Option<FrameOutcome> {
        self.on_frame(&frame.landmarks, frame.timestamp_ms)
    }

    /// Drain a frame source until it ends
    ///
    /// `observe` sees every processed frame. A source error is logged once
    /// and returned; strokes drawn so far stay on the canvas.
    pub fn run<S: FrameSource>(
        &mut self,
        source: &mut S,
        mut observe: impl FnMut(&FrameInput, &FrameOutcome),
    ) -> anyhow::Result<usize> {
        let mut processed = 0;
        loop {
            let frame = match source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(err) => {
                    log::error!("Hand tracking failed after {} frames: {:#}", processed, err);
                    return Err(err.context("Hand tracking failed"));
                }
            };
            if let Some(outcome) = self.handle_frame(&frame) {
                processed += 1;
                observe(&frame, &outcome);
            }
        }
        log::info!(
            "Frame source finished: {} frames, {} strokes",
            processed,
            self.engine.strokes().len()
        );
        Ok(processed)
    }

    fn apply(&mut self, action: GestureAction) {
        log::info!("Gesture action: {:?}", action);
        if !self.tools.apply(action) {
            self.engine.clear();
        }
    }

    /// Stop accepting frames; strokes are kept
    pub fn stop(&mut self) {
        self.running = false;
        self.current = GestureResult::NONE;
        // End any stroke in progress so a restart does not connect to it
        self.engine
            .update(false, None, self.tools.brush_settings());
    }

    /// Resume accepting frames
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Gesture from the most recent frame
    pub fn current_gesture(&self) -> &GestureResult {
        &self.current
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tools.tool = tool;
    }

    /// Select a palette color; returns false if the color is not in the palette
    pub fn set_color(&mut self, color: StrokeColor) -> bool {
        self.tools.set_color(color)
    }

    pub fn set_brush_width(&mut self, width: u32) {
        self.tools.set_brush_width(width);
    }

    pub fn clear(&mut self) {
        self.engine.clear();
    }

    pub fn resize(&mut self, size: SurfaceSize) -> anyhow::Result<()> {
        self.engine.resize(size)
    }

    pub fn engine(&self) -> &StrokeEngine {
        &self.engine
    }

    pub fn export_raster(&self) -> RgbaImage {
        self.engine.export_raster()
    }

    pub fn export_png(&self) -> anyhow::Result<Vec<u8>> {
        self.engine.export_png()
    }
}
