//! The fixed `{status, message, data}` response wrapper.

use serde::Serialize;
use utoipa::ToSchema;

/// Outcome marker carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Response envelope shared by every `/users` endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.to_string(),
            data: Some(data),
        }
    }
}

/// Envelope without a `data` member, e.g. after a delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageEnvelope {
    pub status: EnvelopeStatus,
    pub message: String,
}

impl MessageEnvelope {
    pub fn success(message: &str) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.to_string(),
        }
    }
}

/// `data` member of an error envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorData {
    pub errors: Vec<String>,
}

pub type ErrorEnvelope = Envelope<ErrorData>;

impl ErrorEnvelope {
    pub fn error(message: &str, errors: Vec<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: message.to_string(),
            data: Some(ErrorData { errors }),
        }
    }
}
