use crate::config::{PALETTE, StrokeColor, clamp_brush_width, palette_index_of};
use crate::domain::{BrushSettings, Tool};
use crate::gesture::GestureAction;

/// Current tool configuration, read by the stroke engine on every frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolState {
    pub tool: Tool,
    /// Index into [`PALETTE`]
    pub palette_index: usize,
    pub brush_width: u32,
}

impl ToolState {
    pub fn new(palette_index: usize, brush_width: u32) -> Self {
        Self {
            tool: Tool::Brush,
            palette_index: palette_index % PALETTE.len(),
            brush_width: clamp_brush_width(brush_width),
        }
    }

    pub fn color(&self) -> StrokeColor {
        PALETTE[self.palette_index]
    }

    pub fn brush_settings(&self) -> BrushSettings {
        BrushSettings {
            tool: self.tool,
            color: self.color(),
            width: self.brush_width,
        }
    }

    /// Advance to the next palette color, wrapping around
    pub fn next_color(&mut self) {
        self.palette_index = (self.palette_index + 1) % PALETTE.len();
    }

    /// Select a palette color; colors outside the palette are rejected
    pub fn set_color(&mut self, color: StrokeColor) -> bool {
        match palette_index_of(color) {
            Some(index) => {
                self.palette_index = index;
                true
            }
            None => false,
        }
    }

    /// Set the brush width, clamped to the supported range
    pub fn set_brush_width(&mut self, width: u32) {
        self.brush_width = clamp_brush_width(width);
    }

    /// Apply a tool or color action; returns false for actions that are
    /// not about tool state
    pub fn apply(&mut self, action: GestureAction) -> bool {
        match action {
            GestureAction::SelectTool(tool) => self.tool = tool,
            GestureAction::NextColor => self.next_color(),
            GestureAction::Clear => return false,
        }
        true
    }
}

impl Default for ToolState {
    fn default() -> Self {
        // Blue, 8px
        Self::new(4, 8)
    }
}
