//! Stroke accumulation and canvas state
//!
//! The engine owns the ordered stroke list and the raster derived from it.
//! It is fed once per frame; fingertip positions become stroke segments
//! while drawing is active, and the raster is replayed after every change.

use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::domain::{BrushSettings, Point, Stroke, SurfaceSize};
use crate::render::image as raster;

pub struct StrokeEngine {
    strokes: Vec<Stroke>,
    /// Last position seen while drawing, `None` between strokes
    previous: Option<Point>,
    /// Whether the last stroke is still being extended
    stroke_open: bool,
    size: SurfaceSize,
    surface: Pixmap,
}

impl StrokeEngine {
    pub fn new(size: SurfaceSize) -> anyhow::Result<Self> {
        Ok(Self {
            strokes: Vec::new(),
            previous: None,
            stroke_open: false,
            size,
            surface: raster::new_surface(size)?,
        })
    }

    /// Process one frame of drawing input
    ///
    /// An inactive frame or a missing position breaks the current stroke.
    /// The first active frame after a break only records its position; the
    /// next one starts a new stroke. Later segments extend that stroke until
    /// the brush settings change, which starts another one.
    pub fn update(&mut self, drawing_active: bool, position: Option<Point>, brush: BrushSettings) {
        let current = match position {
            Some(current) if drawing_active => current,
            _ => {
                self.previous = None;
                self.stroke_open = false;
                return;
            }
        };

        let Some(previous) = self.previous.replace(current) else {
            return;
        };

        match self.strokes.last_mut() {
            Some(stroke) if self.stroke_open && stroke.settings() == brush => {
                stroke.points.push(current)
            }
            _ => {
                log::debug!(
                    "Starting stroke #{} ({} {} {}px)",
                    self.strokes.len() + 1,
                    brush.tool.as_str(),
                    brush.color.to_hex(),
                    brush.width
                );
                self.strokes.push(Stroke::new(brush, previous, current));
                self.stroke_open = true;
            }
        }
        self.redraw();
    }

    /// Remove every stroke and reset the surface to blank
    pub fn clear(&mut self) {
        if !self.strokes.is_empty() {
            log::info!("Clearing {} strokes", self.strokes.len());
        }
        self.strokes.clear();
        self.previous = None;
        self.stroke_open = false;
        self.redraw();
    }

    /// Change the surface size and replay the strokes at the new size
    pub fn resize(&mut self, size: SurfaceSize) -> anyhow::Result<()> {
        if size == self.size {
            return Ok(());
        }
        self.surface = raster::new_surface(size)?;
        self.size = size;
        self.redraw();
        Ok(())
    }

    fn redraw(&mut self) {
        raster::replay_strokes(&mut self.surface, &self.strokes);
    }

    /// Snapshot of the current raster
    pub fn export_raster(&self) -> RgbaImage {
        raster::to_rgba_image(&self.surface)
    }

    /// Snapshot of the current raster, PNG encoded
    pub fn export_png(&self) -> anyhow::Result<Vec<u8>> {
        raster::encode_png(&self.export_raster())
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Whether a fingertip position is being tracked
    pub fn is_stroking(&self) -> bool {
        self.previous.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PALETTE;
    use crate::domain::Tool;
    use crate::render::geometry::BACKGROUND;

    fn engine() -> StrokeEngine {
        StrokeEngine::new(SurfaceSize::new(100, 100).unwrap()).unwrap()
    }

    fn brush() -> BrushSettings {
        BrushSettings {
            tool: Tool::Brush,
            color: PALETTE[4],
            width: 8,
        }
    }

    const P1: Point = Point { x: 0.1, y: 0.1 };
    const P2: Point = Point { x: 0.2, y: 0.2 };
    const P3: Point = Point { x: 0.3, y: 0.3 };
    const P4: Point = Point { x: 0.4, y: 0.4 };

    #[test]
    fn test_continuous_drawing_makes_one_stroke() {
        let mut engine = engine();
        for p in [P1, P2, P3] {
            engine.update(true, Some(p), brush());
        }
        assert_eq!(engine.strokes().len(), 1);
        assert_eq!(engine.strokes()[0].points, vec![P1, P2, P3]);
    }

    #[test]
    fn test_first_point_only_records_position() {
        let mut engine = engine();
        engine.update(true, Some(P1), brush());
        assert!(engine.strokes().is_empty());
        assert!(engine.is_stroking());
    }

    #[test]
    fn test_inactive_frame_breaks_stroke() {
        let mut engine = engine();
        engine.update(true, Some(P1), brush());
        engine.update(true, Some(P2), brush());
        engine.update(false, Some(P2), brush());
        assert!(!engine.is_stroking());

        engine.update(true, Some(P3), brush());
        assert_eq!(engine.strokes().len(), 1, "one point does not start a stroke");

        engine.update(true, Some(P4), brush());
        let strokes = engine.strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].points, vec![P1, P2]);
        assert_eq!(strokes[1].points, vec![P3, P4]);
    }

    #[test]
    fn test_missing_position_breaks_stroke() {
        let mut engine = engine();
        engine.update(true, Some(P1), brush());
        engine.update(true, None, brush());
        engine.update(true, Some(P2), brush());
        assert!(engine.strokes().is_empty());
    }

    #[test]
    fn test_settings_change_starts_new_stroke() {
        let mut engine = engine();
        engine.update(true, Some(P1), brush());
        engine.update(true, Some(P2), brush());
        let eraser = BrushSettings {
            tool: Tool::Eraser,
            ..brush()
        };
        engine.update(true, Some(P3), eraser);

        let strokes = engine.strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].points, vec![P1, P2]);
        assert_eq!(strokes[1].points, vec![P2, P3]);
        assert_eq!(strokes[1].tool, Tool::Eraser);
        // Existing strokes keep their settings
        assert_eq!(strokes[0].tool, Tool::Brush);
    }

    #[test]
    fn test_width_and_color_change_start_new_strokes() {
        let mut engine = engine();
        engine.update(true, Some(P1), brush());
        engine.update(true, Some(P2), brush());
        engine.update(true, Some(P3), BrushSettings { width: 12, ..brush() });
        engine.update(
            true,
            Some(P4),
            BrushSettings {
                width: 12,
                color: PALETTE[0],
                ..brush()
            },
        );
        assert_eq!(engine.strokes().len(), 3);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut engine = engine();
        for p in [P1, P2, P3] {
            engine.update(true, Some(p), brush());
        }
        engine.clear();
        let once = (engine.strokes().to_vec(), engine.is_stroking(), engine.export_raster());
        engine.clear();
        let twice = (engine.strokes().to_vec(), engine.is_stroking(), engine.export_raster());
        assert!(once.0.is_empty());
        assert!(!once.1);
        assert_eq!(once, twice);
        assert!(twice.2.pixels().all(|p| p.0 == BACKGROUND));
    }

    #[test]
    fn test_export_reflects_latest_segment() {
        let mut engine = engine();
        engine.update(true, Some(Point::new(0.1, 0.5)), brush());
        engine.update(true, Some(Point::new(0.5, 0.5)), brush());
        assert_eq!(engine.export_raster().get_pixel(75, 50).0, BACKGROUND);

        engine.update(true, Some(Point::new(0.9, 0.5)), brush());
        let blue = PALETTE[4].to_rgba_u8();
        assert_eq!(engine.export_raster().get_pixel(75, 50).0, blue);
        assert_eq!(engine.export_raster().get_pixel(30, 50).0, blue);
    }

    #[test]
    fn test_resize_replays_strokes() {
        let mut engine = engine();
        engine.update(true, Some(Point::new(0.1, 0.5)), brush());
        engine.update(true, Some(Point::new(0.9, 0.5)), brush());

        engine.resize(SurfaceSize::new(200, 50).unwrap()).unwrap();
        let img = engine.export_raster();
        assert_eq!(img.dimensions(), (200, 50));
        assert_eq!(img.get_pixel(100, 25).0, PALETTE[4].to_rgba_u8());
        assert_eq!(img.get_pixel(100, 5).0, BACKGROUND);
    }
}
