//! Wire payload encoding
//!
//! `surface -> WebP -> base64 (inner image string) -> gzip -> base64`.
//! This is the format the game server stores fighters in. The outer base64
//! keeps the payload safe inside JSON; decoding reverses every step and
//! yields the inner image string byte-for-byte.

use super::local::{data_url_to_image, encode_image_base64};
use super::types::{CodecError, ExportFormat};
use crate::surface::PixelSurface;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use byteorder::{ByteOrder, LittleEndian};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use image::RgbaImage;
use std::io::{Read, Write};

/// Image encoding used inside wire payloads
pub const WIRE_FORMAT: ExportFormat = ExportFormat::WebP;

/// Largest inner image string a payload may inflate to
pub const MAX_DECOMPRESSED_LEN: usize = 64 * 1024 * 1024;

/// 10-byte gzip header plus 8-byte CRC32/ISIZE trailer
const GZIP_MIN_LEN: usize = 18;

/// Gzip an inner base64 image string into a payload
pub fn compress_image_base64(image_base64: &str) -> Result<String, CodecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(image_base64.as_bytes())?;
    let compressed = encoder.finish()?;
    tracing::debug!(
        "Payload: {} -> {} bytes ({:.1}% of original)",
        image_base64.len(),
        compressed.len(),
        compressed.len() as f64 / image_base64.len().max(1) as f64 * 100.0
    );
    Ok(BASE64.encode(compressed))
}

/// Encode the surface into a transmittable payload
pub fn encode_surface_payload(surface: &PixelSurface) -> Result<String, CodecError> {
    let image_base64 = encode_image_base64(surface.image(), WIRE_FORMAT)?;
    compress_image_base64(&image_base64)
}

/// Recover the inner base64 image string from a payload.
///
/// Callers prefix the result with `data:image/webp;base64,` to display it.
pub fn decode_payload(payload: &str) -> Result<String, CodecError> {
    let bytes = BASE64.decode(payload)?;
    let decompressed = gunzip(&bytes, MAX_DECOMPRESSED_LEN)?;

    let image_base64 = String::from_utf8(decompressed)?;
    // Reject payloads that inflate cleanly but do not carry an image string
    BASE64.decode(&image_base64)?;
    Ok(image_base64)
}

/// Decode a payload all the way to pixels, e.g. to render a received fighter
pub fn decode_payload_image(payload: &str) -> Result<RgbaImage, CodecError> {
    let image_base64 = decode_payload(payload)?;
    data_url_to_image(&image_base64)
}

/// Inflate a single-member gzip stream of at most `limit` bytes
fn gunzip(bytes: &[u8], limit: usize) -> Result<Vec<u8>, CodecError> {
    if bytes.len() < GZIP_MIN_LEN {
        return Err(CodecError::Truncated(bytes.len()));
    }

    // ISIZE trailer: uncompressed length mod 2^32
    let declared = LittleEndian::read_u32(&bytes[bytes.len() - 4..]) as usize;
    if declared > limit {
        return Err(CodecError::TooLarge { limit });
    }

    let mut decompressed = Vec::with_capacity(declared);
    GzDecoder::new(bytes)
        .take(limit as u64 + 1)
        .read_to_end(&mut decompressed)
        .map_err(CodecError::Decompress)?;
    if decompressed.len() > limit {
        return Err(CodecError::TooLarge { limit });
    }
    Ok(decompressed)
}
