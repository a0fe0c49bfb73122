//! Pointer input - maps mouse and touch samples from element space into surface space

use crate::surface::Point;
use serde::{Deserialize, Serialize};

/// Where the canvas element sits on screen and how large it is displayed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Pointer device the sample came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// A raw pointer sample in client (page) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub client_x: f32,
    pub client_y: f32,
    #[serde(default)]
    pub kind: PointerKind,
}

impl PointerSample {
    pub fn mouse(client_x: f32, client_y: f32) -> Self {
        Self {
            client_x,
            client_y,
            kind: PointerKind::Mouse,
        }
    }

    pub fn touch(client_x: f32, client_y: f32) -> Self {
        Self {
            client_x,
            client_y,
            kind: PointerKind::Touch,
        }
    }
}

/// Scales element-space samples into the surface so strokes stay pixel-accurate
/// when the element is stretched by layout.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    surface_width: f32,
    surface_height: f32,
    display: DisplayRect,
}

impl CoordinateMapper {
    pub fn new(surface_width: u32, surface_height: u32, display: DisplayRect) -> Self {
        Self {
            surface_width: surface_width as f32,
            surface_height: surface_height as f32,
            display,
        }
    }

    /// Mapper for an element displayed at exactly the surface size at the origin
    pub fn identity(surface_width: u32, surface_height: u32) -> Self {
        Self::new(
            surface_width,
            surface_height,
            DisplayRect::new(0.0, 0.0, surface_width as f32, surface_height as f32),
        )
    }

    pub fn set_display(&mut self, display: DisplayRect) {
        self.display = display;
    }

    pub fn display(&self) -> DisplayRect {
        self.display
    }

    fn scale(surface: f32, displayed: f32) -> f32 {
        if !displayed.is_finite() || displayed.abs() < f32::EPSILON {
            return 1.0;
        }
        surface / displayed
    }

    /// Map a sample into surface space.
    ///
    /// The result is not clamped: samples outside the element map outside the
    /// surface and are dropped by the surface itself.
    pub fn map(&self, sample: PointerSample) -> Point {
        let scale_x = Self::scale(self.surface_width, self.display.width);
        let scale_y = Self::scale(self.surface_height, self.display.height);
        Point::new(
            (sample.client_x - self.display.left) * scale_x,
            (sample.client_y - self.display.top) * scale_y,
        )
    }
}
