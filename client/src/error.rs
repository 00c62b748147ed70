use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by the provider clients.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The body is kept apart from the message so callers can log it separately.
    #[error("API returned status {status}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("response contained no {0}")]
    Empty(&'static str),
}

impl ClientError {
    /// Response body of a non-success status, if any.
    pub fn details(&self) -> Option<&str> {
        match self {
            ClientError::Status { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
