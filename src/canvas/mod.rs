//! Doodle canvas - one drawable canvas instance
//!
//! Owns the pixel surface, the undo history and the tool state, and routes
//! pointer gestures to the brush engine, the paint bucket or the color
//! picker. Every completed edit commits exactly one history entry and
//! overwrites this canvas's record in the store.


use crate::brush::{BrushEngine, BrushSettings, Tool};
use crate::codec::{
    data_url_to_image, encode_image, encode_surface_payload, surface_to_data_url, CodecError,
    ExportFormat,
};
use crate::color::{palette_color, Color};
use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::fill::{flood_fill, pick_color};
use crate::history::History;
use crate::input::{CoordinateMapper, DisplayRect, PointerSample};
use crate::store::CanvasStore;
use crate::surface::{PixelSurface, BACKGROUND};
use crate::transport::{CharacterSubmission, SubmissionTransport};
use std::path::Path;
use std::sync::Arc;

/// Called with the current wire payload whenever the canvas content changes
pub type ChangeListener = Box<dyn FnMut(&str)>;

/// What a pointer-down did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// A brush or eraser stroke is now in progress
    StrokeStarted,
    /// The bucket recolored this many pixels
    Filled(usize),
    /// The picker took this color and switched back to the brush
    Picked(Color),
    /// Nothing happened (off-surface click, same-color fill)
    Ignored,
}

pub struct DoodleCanvas {
    config: CanvasConfig,
    surface: PixelSurface,
    history: History,
    brush: BrushSettings,
    engine: BrushEngine,
    mapper: CoordinateMapper,
    store: Arc<dyn CanvasStore>,
    on_change: Option<ChangeListener>,
}

impl DoodleCanvas {
    /// Create a canvas, restoring its last saved state from `store` if any
    pub fn new(config: CanvasConfig, store: Arc<dyn CanvasStore>) -> Result<Self, CanvasError> {
        Self::build(config, store, None)
    }

    /// Like [`DoodleCanvas::new`], and tells `listener` about every content change.
    ///
    /// The listener also fires once right away when a saved drawing was restored.
    pub fn with_change_listener(
        config: CanvasConfig,
        store: Arc<dyn CanvasStore>,
        listener: ChangeListener,
    ) -> Result<Self, CanvasError> {
        Self::build(config, store, Some(listener))
    }

    fn build(
        config: CanvasConfig,
        store: Arc<dyn CanvasStore>,
        on_change: Option<ChangeListener>,
    ) -> Result<Self, CanvasError> {
        config.validate()?;

        let mut surface = PixelSurface::new(config.width, config.height);
        let restored = restore_saved(&mut surface, store.as_ref(), config.slot.key());
        let history = History::new(surface.snapshot(), config.history_limit);

        let mut canvas = Self {
            brush: BrushSettings::new(Tool::Brush, config.stroke_color, config.stroke_width),
            mapper: CoordinateMapper::identity(config.width, config.height),
            engine: BrushEngine::new(),
            config,
            surface,
            history,
            store,
            on_change,
        };

        if restored {
            canvas.notify();
        } else {
            canvas.persist();
        }

        tracing::info!(
            "Canvas {:?} ready: {}x{} (restored: {})",
            canvas.config.slot.key(),
            canvas.config.width,
            canvas.config.height,
            restored
        );
        Ok(canvas)
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_drawing(&self) -> bool {
        self.engine.is_drawing()
    }

    /// Update where the element is displayed, for pointer mapping
    pub fn set_display_rect(&mut self, display: DisplayRect) {
        self.mapper.set_display(display);
    }

    // === Tool state ===

    /// Switching to the bucket or picker finishes any stroke in progress
    pub fn select_tool(&mut self, tool: Tool) {
        if !tool.is_freehand() {
            self.end_stroke();
        }
        self.brush.tool = tool;
    }

    /// Custom color input. Leaves the eraser for the brush; other tools stay.
    ///
    /// A malformed hex string is rejected and the current color kept.
    pub fn set_color(&mut self, hex: &str) -> Result<(), CanvasError> {
        let color = Color::from_hex(hex)?;
        self.brush.color = color;
        if self.brush.tool == Tool::Eraser {
            self.brush.tool = Tool::Brush;
        }
        Ok(())
    }

    /// Palette button: take the preset color and switch to the brush
    pub fn select_palette_color(&mut self, index: usize) -> Result<Color, CanvasError> {
        let color = palette_color(index)?;
        self.brush.color = color;
        self.brush.tool = Tool::Brush;
        Ok(color)
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.brush.set_width(width);
    }

    // === Gestures ===

    /// Mouse-down or touch-start on the element
    pub fn pointer_down(&mut self, sample: PointerSample) -> PointerOutcome {
        let point = self.mapper.map(sample);
        let (x, y) = point.pixel();

        match self.brush.tool {
            Tool::Brush | Tool::Eraser => {
                self.engine.begin(point, &self.brush);
                PointerOutcome::StrokeStarted
            }
            Tool::Bucket => match self.bucket_fill(x, y) {
                0 => PointerOutcome::Ignored,
                filled => PointerOutcome::Filled(filled),
            },
            Tool::Picker => match self.pick_color_at(x, y) {
                Some(color) => PointerOutcome::Picked(color),
                None => PointerOutcome::Ignored,
            },
        }
    }

    /// Mouse-move or touch-move; only draws while a stroke is in progress
    pub fn pointer_move(&mut self, sample: PointerSample) {
        if !self.engine.is_drawing() {
            return;
        }
        let point = self.mapper.map(sample);
        self.engine.extend(&mut self.surface, point);
    }

    /// Mouse-up
    pub fn pointer_up(&mut self) {
        self.end_stroke();
    }

    /// The pointer left the element mid-drag
    pub fn pointer_leave(&mut self) {
        self.end_stroke();
    }

    pub fn touch_end(&mut self) {
        self.end_stroke();
    }

    fn end_stroke(&mut self) {
        if self.engine.end() {
            self.commit();
        }
    }

    /// Paint bucket at a surface pixel with the current color.
    ///
    /// Returns the number of recolored pixels; a history entry is committed
    /// only when that is non-zero.
    pub fn bucket_fill(&mut self, x: i64, y: i64) -> usize {
        let filled = flood_fill(&mut self.surface, x, y, self.brush.color);
        if filled > 0 {
            self.commit();
        }
        filled
    }

    /// Take the color under a surface pixel and switch back to the brush.
    /// Does not touch the surface or the history.
    pub fn pick_color_at(&mut self, x: i64, y: i64) -> Option<Color> {
        let color = pick_color(&self.surface, x, y)?;
        self.brush.color = color;
        self.brush.tool = Tool::Brush;
        tracing::debug!("Picked {} at ({}, {})", color, x, y);
        Some(color)
    }

    /// Fill with the background and commit
    pub fn clear(&mut self) {
        self.surface.fill_all(BACKGROUND);
        self.commit();
    }

    // === History ===

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns `false` when there is nothing to undo.
    /// A stroke in progress is finished first, so it is what gets undone.
    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.surface.restore(snapshot);
        self.notify();
        true
    }

    /// Returns `false` when there is nothing to redo. Finishing a stroke
    /// in progress commits it, which discards the redo branch.
    pub fn redo(&mut self) -> bool {
        self.end_stroke();
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.surface.restore(snapshot);
        self.notify();
        true
    }

    fn commit(&mut self) {
        self.history.commit(self.surface.snapshot());
        self.persist();
        self.notify();
    }

    // === Encoding ===

    /// Compressed wire payload of the current surface
    pub fn payload(&self) -> Result<String, CanvasError> {
        Ok(encode_surface_payload(&self.surface)?)
    }

    /// Lossless data URL of the current surface
    pub fn data_url(&self) -> Result<String, CanvasError> {
        Ok(surface_to_data_url(&self.surface)?)
    }

    /// Encoded image file bytes
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, CanvasError> {
        Ok(encode_image(self.surface.image(), format)?)
    }

    /// Write the drawing to `path`; the format follows the extension
    pub fn export_to_path(&self, path: &Path) -> Result<(), CanvasError> {
        let path_str = path.to_string_lossy();
        let format = ExportFormat::from_path(&path_str).ok_or_else(|| {
            CanvasError::InvalidInput(format!("Unknown image format for path: {}", path_str))
        })?;
        let bytes = self.export(format)?;
        std::fs::write(path, bytes).map_err(CodecError::from)?;
        tracing::info!("Exported drawing to {:?}", path);
        Ok(())
    }

    // === Submission ===

    /// Send the drawing as a new fighter.
    ///
    /// Requires a logged-in creator. On success the saved record is removed
    /// and the canvas starts over from a blank, single-entry history. On any
    /// failure the canvas is left as it was.
    pub fn submit(
        &mut self,
        transport: &dyn SubmissionTransport,
        name: &str,
        creator_id: Option<&str>,
    ) -> Result<CharacterSubmission, CanvasError> {
        let creator_id = creator_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(CanvasError::NotLoggedIn)?;

        let submission = CharacterSubmission::new(
            self.payload()?,
            name,
            creator_id,
            self.surface.width(),
            self.surface.height(),
        );

        let response = transport.submit_character(&submission)?;
        if response.is_error() {
            let message = response
                .message
                .unwrap_or_else(|| "Submission failed".to_string());
            tracing::warn!("Submission {} rejected: {}", submission.id, message);
            return Err(CanvasError::Rejected(message));
        }

        tracing::info!("Submitted fighter {:?} ({})", submission.name, submission.id);

        if let Err(e) = self.store.remove(self.config.slot.key()) {
            tracing::warn!("Failed to remove saved canvas after submission: {}", e);
        }
        self.engine.end();
        self.surface.fill_all(BACKGROUND);
        self.history.reset(self.surface.snapshot());
        self.notify();

        Ok(submission)
    }

    // === Persistence ===

    /// Save the current surface to the store
    pub fn flush(&self) -> Result<(), CanvasError> {
        let data_url = surface_to_data_url(&self.surface)?;
        self.store.save(self.config.slot.key(), &data_url)?;
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to save canvas {:?}: {}", self.config.slot.key(), e);
        }
    }

    fn notify(&mut self) {
        let Some(listener) = self.on_change.as_mut() else {
            return;
        };
        match encode_surface_payload(&self.surface) {
            Ok(payload) => listener(&payload),
            Err(e) => tracing::warn!("Failed to encode canvas payload: {}", e),
        }
    }
}

impl Drop for DoodleCanvas {
    fn drop(&mut self) {
        self.persist();
    }
}

/// Load the saved drawing for `key` into `surface`.
///
/// A missing or unreadable record leaves the white surface in place.
fn restore_saved(surface: &mut PixelSurface, store: &dyn CanvasStore, key: &str) -> bool {
    let saved = match store.load(key) {
        Ok(Some(saved)) => saved,
        Ok(None) => return false,
        Err(e) => {
            tracing::warn!("Failed to read saved canvas {:?}: {}", key, e);
            return false;
        }
    };

    match data_url_to_image(&saved) {
        Ok(image) => {
            if image.dimensions() != surface.dimensions() {
                tracing::debug!(
                    "Saved canvas {:?} is {:?}, surface is {:?}",
                    key,
                    image.dimensions(),
                    surface.dimensions()
                );
            }
            surface.blit(&image);
            true
        }
        Err(e) => {
            tracing::warn!("Discarding corrupt saved canvas {:?}: {}", key, e);
            false
        }
    }
}
