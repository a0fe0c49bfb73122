//! Brush engine - turns pointer drags into rasterized stroke segments

use super::BrushSettings;
use crate::surface::{PixelSurface, Point};
use image::Rgba;

/// Stroke renderer state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokePhase {
    Idle,
    /// A stroke is in progress; `last` is the previous recorded point.
    /// Color and width are fixed when the stroke starts.
    Drawing {
        last: Point,
        color: Rgba<u8>,
        width: f32,
    },
}

/// Freehand stroke state machine: `Idle -> Drawing -> Idle`.
///
/// Consecutive samples are joined by straight segments, without smoothing.
#[derive(Debug, Clone)]
pub struct BrushEngine {
    phase: StrokePhase,
    segments: usize,
}

impl BrushEngine {
    pub fn new() -> Self {
        Self {
            phase: StrokePhase::Idle,
            segments: 0,
        }
    }

    pub fn phase(&self) -> StrokePhase {
        self.phase
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.phase, StrokePhase::Drawing { .. })
    }

    /// Start a stroke at `point` with the current settings.
    /// Nothing is painted until the first move.
    pub fn begin(&mut self, point: Point, settings: &BrushSettings) {
        self.phase = StrokePhase::Drawing {
            last: point,
            color: settings.stroke_color().to_rgba(),
            width: settings.width() as f32,
        };
        self.segments = 0;
    }

    /// Draw from the previous point to `point`. Ignored while idle.
    pub fn extend(&mut self, surface: &mut PixelSurface, point: Point) {
        let StrokePhase::Drawing { last, color, width } = self.phase else {
            return;
        };

        surface.draw_line_segment(last, point, color, width);
        self.segments += 1;
        self.phase = StrokePhase::Drawing {
            last: point,
            color,
            width,
        };
    }

    /// Finish the stroke.
    ///
    /// Returns `true` when a stroke was actually in progress, meaning the
    /// caller must commit one history entry.
    pub fn end(&mut self) -> bool {
        if !self.is_drawing() {
            return false;
        }
        tracing::debug!("Stroke finished after {} segments", self.segments);
        self.phase = StrokePhase::Idle;
        true
    }
}

impl Default for BrushEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::Tool;
    use crate::color::Color;
    use crate::surface::BACKGROUND;

    fn red_brush(width: u32) -> BrushSettings {
        BrushSettings::new(Tool::Brush, Color::rgb(255, 0, 0), width)
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut engine = BrushEngine::new();
        let mut surface = PixelSurface::new(8, 8);
        engine.extend(&mut surface, Point::new(4.0, 4.0));
        assert_eq!(surface, PixelSurface::new(8, 8));
        assert!(!engine.end());
    }

    #[test]
    fn test_down_move_up_draws_and_commits_once() {
        let mut engine = BrushEngine::new();
        let mut surface = PixelSurface::new(8, 8);

        engine.begin(Point::new(0.5, 3.5), &red_brush(1));
        assert!(engine.is_drawing());
        engine.extend(&mut surface, Point::new(4.5, 3.5));
        engine.extend(&mut surface, Point::new(7.5, 3.5));

        for x in 0..8 {
            assert_eq!(surface.get_pixel(x, 3), Some(Color::rgb(255, 0, 0).to_rgba()));
        }
        assert!(engine.end());
        assert!(!engine.end());
        assert_eq!(engine.phase(), StrokePhase::Idle);
    }

    #[test]
    fn test_press_without_move_paints_nothing() {
        let mut engine = BrushEngine::new();
        let surface = PixelSurface::new(8, 8);
        engine.begin(Point::new(2.0, 2.0), &red_brush(4));
        assert!(engine.end());
        assert_eq!(surface.get_pixel(2, 2), Some(BACKGROUND));
    }

    #[test]
    fn test_eraser_restores_background() {
        let mut engine = BrushEngine::new();
        let mut surface = PixelSurface::new(6, 6);
        surface.fill_all(Color::BLACK.to_rgba());

        let eraser = BrushSettings::new(Tool::Eraser, Color::rgb(0, 0, 255), 2);
        engine.begin(Point::new(0.0, 3.0), &eraser);
        engine.extend(&mut surface, Point::new(6.0, 3.0));
        engine.end();

        assert_eq!(surface.get_pixel(3, 2), Some(BACKGROUND));
        assert_eq!(surface.get_pixel(3, 0), Some(Color::BLACK.to_rgba()));
    }

    #[test]
    fn test_settings_change_mid_stroke_is_ignored() {
        let mut engine = BrushEngine::new();
        let mut surface = PixelSurface::new(8, 8);
        let mut settings = red_brush(1);

        engine.begin(Point::new(0.5, 3.5), &settings);
        settings.color = Color::rgb(0, 0, 255);
        settings.set_width(20);
        engine.extend(&mut surface, Point::new(7.5, 3.5));

        assert_eq!(surface.get_pixel(4, 3), Some(Color::rgb(255, 0, 0).to_rgba()));
        assert_eq!(surface.get_pixel(4, 2), Some(BACKGROUND));
    }
}
