//! Configuration persistence for aircanvas settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Narrowest brush the control surface allows, in pixels
pub const MIN_BRUSH_WIDTH: u32 = 2;
/// Widest brush the control surface allows, in pixels
pub const MAX_BRUSH_WIDTH: u32 = 20;

/// Opaque RGB color used for brush strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrokeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl StrokeColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Fixed cyclic color palette, advanced by the thumbs-up gesture
pub const PALETTE: [StrokeColor; 8] = [
    StrokeColor::rgb(0xef, 0x44, 0x44), // red
    StrokeColor::rgb(0xf9, 0x73, 0x16), // orange
    StrokeColor::rgb(0xea, 0xb3, 0x08), // yellow
    StrokeColor::rgb(0x22, 0xc5, 0x5e), // green
    StrokeColor::rgb(0x3b, 0x82, 0xf6), // blue
    StrokeColor::rgb(0x8b, 0x5c, 0xf6), // violet
    StrokeColor::rgb(0xec, 0x48, 0x99), // pink
    StrokeColor::rgb(0x00, 0x00, 0x00), // black
];

/// Position of a color in [`PALETTE`]
pub fn palette_index_of(color: StrokeColor) -> Option<usize> {
    PALETTE.iter().position(|c| *c == color)
}

/// Clamp a requested brush width into the supported range
pub fn clamp_brush_width(width: u32) -> u32 {
    width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH)
}

/// Default folder for downloaded drawings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Pictures,
    Documents,
}

impl SaveLocation {
    /// Resolve to a directory, falling back to the home directory layout
    pub fn dir(self) -> Option<PathBuf> {
        match self {
            SaveLocation::Pictures => {
                dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
            }
            SaveLocation::Documents => {
                dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
            }
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirCanvasConfig {
    /// Drawing surface width in pixels
    pub canvas_width: u32,
    /// Drawing surface height in pixels
    pub canvas_height: u32,
    /// Initial brush width (clamped to 2-20)
    pub brush_width: u32,
    /// Initial index into the color palette
    pub palette_index: usize,
    /// Minimum time between two gesture-triggered actions
    pub debounce_ms: u64,
    /// Gestures must exceed this confidence to trigger an action
    pub action_confidence: f32,
    /// The point gesture must exceed this confidence to draw
    pub draw_confidence: f32,
    /// Where downloaded drawings go by default
    pub save_location: SaveLocation,
    /// Gallery directory (None = data dir)
    pub gallery_dir: Option<PathBuf>,
    /// Download directory (None = `save_location`)
    pub export_dir: Option<PathBuf>,
}

impl Default for AirCanvasConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1280,
            canvas_height: 720,
            brush_width: 8,
            // Blue
            palette_index: 4,
            debounce_ms: 1000,
            action_confidence: 0.7,
            draw_confidence: 0.6,
            save_location: SaveLocation::Pictures,
            gallery_dir: None,
            export_dir: None,
        }
    }
}

impl AirCanvasConfig {
    /// Application directory name under the XDG config/data dirs
    pub const ID: &'static str = "aircanvas";

    /// Path of the config file in the user's config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Gallery directory, either configured or under the user's data directory
    pub fn gallery_dir(&self) -> Option<PathBuf> {
        self.gallery_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(Self::ID).join("gallery")))
    }

    /// Download directory, either configured or the save location's folder
    pub fn export_dir(&self) -> Option<PathBuf> {
        self.export_dir.clone().or_else(|| self.save_location.dir())
    }

    /// Load configuration from the default location, or return defaults
    pub fn load_default() -> Self {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => {
                log::warn!("Could not determine config directory, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::read(path) {
            Ok(config) => config.sanitized(),
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save configuration to disk
    pub fn save(&self, path: &Path) {
        if let Err(err) = self.write(path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    /// Save configuration to disk, reporting failures to the caller
    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Pull out-of-range values back to something usable
    fn sanitized(mut self) -> Self {
        self.brush_width = clamp_brush_width(self.brush_width);
        if self.palette_index >= PALETTE.len() {
            log::warn!(
                "Palette index {} out of range, wrapping",
                self.palette_index
            );
            self.palette_index %= PALETTE.len();
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            let defaults = Self::default();
            self.canvas_width = defaults.canvas_width;
            self.canvas_height = defaults.canvas_height;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_for_palette() {
        for color in PALETTE {
            assert_eq!(StrokeColor::from_hex(&color.to_hex()), Some(color));
        }
        assert_eq!(PALETTE[4].to_hex(), "#3b82f6");
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert_eq!(StrokeColor::from_hex("#12345"), None);
        assert_eq!(StrokeColor::from_hex("zzzzzz"), None);
        assert_eq!(
            StrokeColor::from_hex("ef4444"),
            Some(StrokeColor::rgb(0xef, 0x44, 0x44))
        );
    }

    #[test]
    fn test_brush_width_clamped() {
        assert_eq!(clamp_brush_width(0), MIN_BRUSH_WIDTH);
        assert_eq!(clamp_brush_width(8), 8);
        assert_eq!(clamp_brush_width(100), MAX_BRUSH_WIDTH);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: AirCanvasConfig = serde_json::from_str(r#"{"brush_width": 12}"#).unwrap();
        assert_eq!(config.brush_width, 12);
        assert_eq!(config.debounce_ms, 1000);
        assert_eq!(config.palette_index, 4);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AirCanvasConfig {
            brush_width: 14,
            palette_index: 2,
            ..Default::default()
        };
        config.save(&path);
        assert_eq!(AirCanvasConfig::load(&path), config);
    }

    #[test]
    fn test_load_sanitizes_out_of_range_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"brush_width": 99, "palette_index": 9}"#).unwrap();
        let config = AirCanvasConfig::load(&path);
        assert_eq!(config.brush_width, MAX_BRUSH_WIDTH);
        assert_eq!(config.palette_index, 1);
    }

    #[test]
    fn test_export_dir_override() {
        let config = AirCanvasConfig {
            export_dir: Some(PathBuf::from("/tmp/drawings")),
            ..Default::default()
        };
        assert_eq!(config.export_dir(), Some(PathBuf::from("/tmp/drawings")));
    }

    #[test]
    fn test_load_invalid_json_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(AirCanvasConfig::load(&path), AirCanvasConfig::default());
    }
}
