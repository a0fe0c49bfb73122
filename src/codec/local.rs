//! Local persistence encoding: surface <-> `data:image/png;base64,...`

use super::types::{CodecError, ExportFormat};
use crate::surface::PixelSurface;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::RgbaImage;
use std::io::Cursor;

/// Encode an image into the bytes of a standard image file
pub fn encode_image(image: &RgbaImage, format: ExportFormat) -> Result<Vec<u8>, CodecError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format.image_format())?;
    Ok(buffer.into_inner())
}

/// Base64 of the encoded image, without any data URL prefix
pub fn encode_image_base64(image: &RgbaImage, format: ExportFormat) -> Result<String, CodecError> {
    Ok(BASE64.encode(encode_image(image, format)?))
}

/// Prefix a bare base64 image string with its data URL scheme
pub fn to_data_url(image_base64: &str, format: ExportFormat) -> String {
    format!("data:{};base64,{}", format.mime_type(), image_base64)
}

/// Strip a `data:<mime>;base64,` prefix if present
pub fn strip_data_url_prefix(data: &str) -> Result<&str, CodecError> {
    if !data.starts_with("data:") {
        return Ok(data);
    }
    match data.split_once(',') {
        Some((header, body)) if header.ends_with(";base64") => Ok(body),
        Some((header, _)) => Err(CodecError::DataUrl(format!(
            "expected base64 data URL, got header {:?}",
            header
        ))),
        None => Err(CodecError::DataUrl("missing ',' separator".to_string())),
    }
}

/// Lossless data URL of the surface, as kept in the canvas store
pub fn surface_to_data_url(surface: &PixelSurface) -> Result<String, CodecError> {
    let encoded = encode_image_base64(surface.image(), ExportFormat::Png)?;
    Ok(to_data_url(&encoded, ExportFormat::Png))
}

/// Decode a data URL (or bare base64) of any supported image format
pub fn data_url_to_image(data: &str) -> Result<RgbaImage, CodecError> {
    let base64_data = strip_data_url_prefix(data)?;
    let bytes = BASE64.decode(base64_data)?;
    let img = image::load_from_memory(&bytes)?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn sample_surface() -> PixelSurface {
        let mut surface = PixelSurface::new(6, 4);
        surface.fill_rect(1, 1, 3, 2, Color::rgb(255, 0, 0).to_rgba());
        surface.set_pixel(5, 3, image::Rgba([0, 128, 255, 64]));
        surface
    }

    #[test]
    fn test_data_url_has_png_prefix() {
        let url = surface_to_data_url(&sample_surface()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_data_url_restores_exact_pixels() {
        let surface = sample_surface();
        let url = surface_to_data_url(&surface).unwrap();
        let restored = data_url_to_image(&url).unwrap();
        assert_eq!(&restored, surface.image());
    }

    #[test]
    fn test_bare_base64_is_accepted() {
        let surface = sample_surface();
        let bare = encode_image_base64(surface.image(), ExportFormat::Png).unwrap();
        assert_eq!(&data_url_to_image(&bare).unwrap(), surface.image());
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/webp;base64,QUJD").unwrap(), "QUJD");
        assert_eq!(strip_data_url_prefix("QUJD").unwrap(), "QUJD");
        assert!(strip_data_url_prefix("data:text/plain,hello").is_err());
        assert!(strip_data_url_prefix("data:image/png;base64").is_err());
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        assert!(data_url_to_image("data:image/png;base64,@@@").is_err());
        assert!(data_url_to_image("data:image/png;base64,QUJDRA==").is_err());
    }
}
