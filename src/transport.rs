//! Character submission payload and the transport boundary
//!
//! The canvas builds the payload and hands it to a `SubmissionTransport`
//! supplied by the host (socket client, HTTP client, test double). It never
//! retries or waits on the transport's behalf.

use serde::{Deserialize, Serialize};

/// Name used when the player submits without naming the fighter
pub const UNNAMED_FIGHTER: &str = "???";

/// Transport failures
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fighter drawing sent to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSubmission {
    pub id: String,
    /// Compressed wire payload of the drawing
    #[serde(rename = "imageBase")]
    pub image_base: String,
    pub name: String,
    pub creator_id: String,
    pub width: u32,
    pub height: u32,
}

impl CharacterSubmission {
    /// Build a submission with a fresh id; blank names become `???`
    pub fn new(image_base: String, name: &str, creator_id: &str, width: u32, height: u32) -> Self {
        let name = name.trim();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            image_base,
            name: if name.is_empty() {
                UNNAMED_FIGHTER.to_string()
            } else {
                name.to_string()
            },
            creator_id: creator_id.to_string(),
            width,
            height,
        }
    }

    pub fn to_json(&self) -> Result<String, TransportError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Outcome status reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    Ok,
    Error,
}

/// Server acknowledgement of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub status: SubmitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitResponse {
    pub fn ok() -> Self {
        Self {
            status: SubmitStatus::Ok,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: SubmitStatus::Error,
            message: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == SubmitStatus::Error
    }
}

/// Delivers submissions to the server
pub trait SubmissionTransport {
    fn submit_character(
        &self,
        submission: &CharacterSubmission,
    ) -> Result<SubmitResponse, TransportError>;
}
