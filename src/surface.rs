//! Pixel surface - the fixed-size RGBA raster a canvas edits
//!
//! All coordinates are signed; anything outside the raster is ignored so
//! pointer samples that drift off the element during a fast drag never fail.

use image::{ImageBuffer, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Background color of a fresh or cleared surface
pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A point in surface space (pixels, sub-pixel precision)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Integer pixel containing this point
    pub fn pixel(&self) -> (i64, i64) {
        (self.x.floor() as i64, self.y.floor() as i64)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Owned RGBA raster with immutable dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    image: RgbaImage,
}

impl PixelSurface {
    /// Create a white surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageBuffer::from_pixel(width, height, BACKGROUND),
        }
    }

    /// Wrap an existing image
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw interleaved RGBA bytes, row-major
    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width()) && y < i64::from(self.height())
    }

    pub fn get_pixel(&self, x: i64, y: i64) -> Option<Rgba<u8>> {
        if !self.contains(x, y) {
            return None;
        }
        Some(*self.image.get_pixel(x as u32, y as u32))
    }

    /// Out-of-range writes are dropped
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if self.contains(x, y) {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    pub fn fill_all(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Fill an axis-aligned rectangle, clipped to the surface
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgba<u8>) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(width)).min(i64::from(self.width()));
        let y1 = (y + i64::from(height)).min(i64::from(self.height()));

        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// Draw a solid segment with round caps.
    ///
    /// Every pixel whose center lies within `width / 2` of the segment is
    /// painted, so consecutive segments of a stroke also meet with round joins.
    pub fn draw_line_segment(&mut self, from: Point, to: Point, color: Rgba<u8>, width: f32) {
        if !from.is_finite() || !to.is_finite() || self.image.is_empty() {
            return;
        }

        let radius = width.max(1.0) / 2.0;
        let radius_sq = radius * radius;

        let x_lo = (from.x.min(to.x) - radius).floor().max(0.0) as u32;
        let y_lo = (from.y.min(to.y) - radius).floor().max(0.0) as u32;
        let x_hi = ((from.x.max(to.x) + radius).ceil().max(0.0) as u32).min(self.width());
        let y_hi = ((from.y.max(to.y) + radius).ceil().max(0.0) as u32).min(self.height());

        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let len_sq = dx * dx + dy * dy;

        for py in y_lo..y_hi {
            let cy = py as f32 + 0.5;
            for px in x_lo..x_hi {
                let cx = px as f32 + 0.5;

                // Project the pixel center onto the segment
                let t = if len_sq > 0.0 {
                    (((cx - from.x) * dx + (cy - from.y) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let nx = from.x + t * dx - cx;
                let ny = from.y + t * dy - cy;

                if nx * nx + ny * ny <= radius_sq {
                    self.image.put_pixel(px, py, color);
                }
            }
        }
    }

    /// Owned copy of the current contents
    pub fn snapshot(&self) -> RgbaImage {
        self.image.clone()
    }

    /// Replace the whole surface with a snapshot of the same size.
    ///
    /// Returns `false` and leaves the surface untouched on a size mismatch.
    pub fn restore(&mut self, snapshot: &RgbaImage) -> bool {
        if snapshot.dimensions() != self.dimensions() {
            tracing::warn!(
                "Refusing to restore {:?} snapshot into {:?} surface",
                snapshot.dimensions(),
                self.dimensions()
            );
            return false;
        }
        self.image.copy_from_slice(snapshot);
        true
    }

    /// Clear to transparent and copy the overlapping part of `image` at the origin
    pub fn blit(&mut self, image: &RgbaImage) {
        self.fill_all(TRANSPARENT);
        let w = image.width().min(self.width());
        let h = image.height().min(self.height());
        for y in 0..h {
            for x in 0..w {
                self.image.put_pixel(x, y, *image.get_pixel(x, y));
            }
        }
    }
}
