//! Paint bucket and color picker
//!
//! The bucket recolors the maximal 4-connected region whose pixels exactly
//! match the clicked pixel (all four channels, no tolerance). Diagonal
//! neighbours are never part of the region.

use crate::color::Color;
use crate::surface::PixelSurface;

/// Recolor the region under `(start_x, start_y)` with `fill`.
///
/// Returns the number of recolored pixels. `0` means nothing changed: the
/// click was off the surface or the region already had the fill color.
pub fn flood_fill(surface: &mut PixelSurface, start_x: i64, start_y: i64, fill: Color) -> usize {
    let Some(target) = surface.get_pixel(start_x, start_y) else {
        return 0;
    };
    let replacement = fill.to_rgba();
    if target == replacement {
        return 0;
    }

    let width = i64::from(surface.width());
    let height = i64::from(surface.height());
    let target = target.0;
    let replacement = replacement.0;
    let data = surface.raw_mut();

    let mut filled = 0usize;
    let mut stack: Vec<(i64, i64)> = Vec::with_capacity(1024);
    stack.push((start_x, start_y));

    // Neighbours are pushed unconditionally; the bounds and exact-match test
    // on pop rejects anything already filled, since the fill color can never
    // match the target again.
    while let Some((x, y)) = stack.pop() {
        if x < 0 || y < 0 || x >= width || y >= height {
            continue;
        }
        let pos = ((y * width + x) * 4) as usize;
        if data[pos..pos + 4] != target {
            continue;
        }

        data[pos..pos + 4].copy_from_slice(&replacement);
        filled += 1;

        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }

    tracing::debug!(
        "Flood fill at ({}, {}) recolored {} pixels to {}",
        start_x,
        start_y,
        filled,
        fill
    );
    filled
}

/// RGB under the pixel, or `None` off the surface
pub fn pick_color(surface: &PixelSurface, x: i64, y: i64) -> Option<Color> {
    surface.get_pixel(x, y).map(Color::from_rgba)
}
