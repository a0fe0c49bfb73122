use thiserror::Error;

use crate::codec::CodecError;
use crate::color::ColorError;
use crate::config::ConfigError;
use crate::store::StoreError;
use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Invalid color: {0}")]
    Color(#[from] ColorError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("You must be logged in to submit a fighter")]
    NotLoggedIn,

    #[error("Submission rejected: {0}")]
    Rejected(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<CanvasError> for String {
    fn from(value: CanvasError) -> Self {
        value.to_string()
    }
}
