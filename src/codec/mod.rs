//! Canvas image codecs
//!
//! - `local`: lossless PNG data URLs for the per-canvas store
//! - `wire`: compressed, JSON-safe payloads for submission to the server

pub mod local;
pub mod types;
pub mod wire;

pub use local::{
    data_url_to_image, encode_image, encode_image_base64, strip_data_url_prefix,
    surface_to_data_url, to_data_url,
};
pub use types::*;
pub use wire::{
    compress_image_base64, decode_payload, decode_payload_image, encode_surface_payload,
    WIRE_FORMAT,
};
