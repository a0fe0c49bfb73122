//! Codec types shared by the local and wire encodings

use serde::{Deserialize, Serialize};

/// Standard image encodings the canvas can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    WebP,
}

impl ExportFormat {
    /// Detect format from file extension
    pub fn from_path(path: &str) -> Option<Self> {
        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".png") {
            Some(ExportFormat::Png)
        } else if path_lower.ends_with(".webp") {
            Some(ExportFormat::WebP)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::WebP => "webp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::WebP => "image/webp",
        }
    }

    pub(crate) fn image_format(&self) -> image::ImageFormat {
        match self {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

/// Encoding and decoding errors
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Decompression error: {0}")]
    Decompress(std::io::Error),

    #[error("Payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Payload truncated: {0} bytes")]
    Truncated(usize),

    #[error("Payload inflates past {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Invalid data URL: {0}")]
    DataUrl(String),
}

impl From<CodecError> for String {
    fn from(e: CodecError) -> Self {
        e.to_string()
    }
}
