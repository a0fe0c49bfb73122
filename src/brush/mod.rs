//! Brush module - tool selection and freehand stroke rendering

mod engine;

pub use engine::{BrushEngine, StrokePhase};

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Thinnest stroke the toolbar allows
pub const MIN_STROKE_WIDTH: u32 = 1;
/// Thickest stroke the toolbar allows
pub const MAX_STROKE_WIDTH: u32 = 20;
/// Stroke width of a fresh canvas
pub const DEFAULT_STROKE_WIDTH: u32 = 4;

/// Active canvas tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Brush,
    /// Paints with the background color
    Eraser,
    /// Paint bucket
    Bucket,
    /// One-shot color picker, falls back to the brush after use
    Picker,
}

impl Tool {
    /// Whether pointer-down starts a freehand stroke
    pub fn is_freehand(self) -> bool {
        match self {
            Tool::Brush | Tool::Eraser => true,
            Tool::Bucket | Tool::Picker => false,
        }
    }
}

/// Tool state read by the stroke renderer and the fill engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushSettings {
    pub tool: Tool,
    pub color: Color,
    width: u32,
}

impl BrushSettings {
    pub fn new(tool: Tool, color: Color, width: u32) -> Self {
        Self {
            tool,
            color,
            width: clamp_width(width),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = clamp_width(width);
    }

    /// Color a freehand stroke paints with; the eraser paints background white
    pub fn stroke_color(&self) -> Color {
        match self.tool {
            Tool::Eraser => Color::WHITE,
            Tool::Brush | Tool::Bucket | Tool::Picker => self.color,
        }
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::new(Tool::Brush, Color::BLACK, DEFAULT_STROKE_WIDTH)
    }
}

fn clamp_width(width: u32) -> u32 {
    width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
}
