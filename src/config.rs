//! Canvas configuration supplied by the embedding host

use crate::brush::DEFAULT_STROKE_WIDTH;
use crate::color::Color;
use crate::store::CanvasSlot;
use serde::{Deserialize, Serialize};

/// Largest surface edge accepted
pub const MAX_DIMENSION: u32 = 16384;

/// Width of the main fighter canvas
pub const DEFAULT_WIDTH: u32 = 754;
/// Height of the main fighter canvas
pub const DEFAULT_HEIGHT: u32 = 400;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Canvas dimensions must be greater than 0, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Canvas dimensions cannot exceed {max} pixels, got {width}x{height}")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-instance canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Which store record this canvas reads and writes
    pub slot: CanvasSlot,
    pub stroke_color: Color,
    /// Clamped to `1..=20` when the canvas is created
    pub stroke_width: u32,
    /// Maximum number of history entries; `None` (the default) keeps every edit
    pub history_limit: Option<usize>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            slot: CanvasSlot::Main,
            stroke_color: Color::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
            history_limit: None,
        }
    }
}

impl CanvasConfig {
    /// Config for a canvas of the given size, other settings default
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Small square portrait canvas on the account page
    pub fn account_portrait(size: u32) -> Self {
        Self {
            slot: CanvasSlot::Account,
            ..Self::with_size(size, size)
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check dimensions; stroke width is clamped rather than rejected
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
                max: MAX_DIMENSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert_eq!((config.width, config.height), (754, 400));
        assert_eq!(config.slot, CanvasSlot::Main);
        assert_eq!(config.stroke_width, 4);
        assert_eq!(config.history_limit, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CanvasConfig::from_json(
            r##"{"width": 200, "height": 200, "slot": "account", "stroke_color": "#FF0000"}"##,
        )
        .unwrap();
        assert_eq!(config.width, 200);
        assert_eq!(config.slot, CanvasSlot::Account);
        assert_eq!(config.stroke_color, Color::rgb(255, 0, 0));
        assert_eq!(config.history_limit, None);
    }

    #[test]
    fn test_custom_slot_and_bounded_history() {
        let config =
            CanvasConfig::from_json(r#"{"slot": {"custom": "preview"}, "history_limit": 30}"#)
                .unwrap();
        assert_eq!(config.slot, CanvasSlot::Custom("preview".into()));
        assert_eq!(config.history_limit, Some(30));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            CanvasConfig::with_size(0, 10).validate(),
            Err(ConfigError::ZeroDimension { .. })
        ));
        assert!(matches!(
            CanvasConfig::with_size(20000, 10).validate(),
            Err(ConfigError::TooLarge { .. })
        ));
        assert!(CanvasConfig::from_json(r#"{"height": 0}"#).is_err());
    }

    #[test]
    fn test_invalid_color_rejected() {
        assert!(matches!(
            CanvasConfig::from_json(r#"{"stroke_color": "blurple"}"#),
            Err(ConfigError::Json(_))
        ));
    }
}
