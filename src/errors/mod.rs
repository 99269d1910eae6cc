//! Error handling module for the label client.
//!
//! Provides one error type for every layer, with stable error codes.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const HTTP_STATUS: &str = "HTTP_STATUS";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UPLOAD_ERROR: &str = "UPLOAD_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Client error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("server responded with {status}")]
    Status { status: StatusCode, body: Value },
    /// The response body did not have the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Token storage backend failure
    #[error("token storage error: {0}")]
    Storage(String),
    /// Invalid input detected before sending
    #[error("validation error: {0}")]
    Validation(String),
    /// User-facing upload failure message
    #[error("{0}")]
    Upload(String),
    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Transport(_) => codes::TRANSPORT_ERROR,
            ClientError::Status { .. } => codes::HTTP_STATUS,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Storage(_) => codes::STORAGE_ERROR,
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
            ClientError::Upload(_) => codes::UPLOAD_ERROR,
            ClientError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// The `detail` field of an error response body.
    pub fn detail(&self) -> Option<String> {
        let ClientError::Status { body, .. } = self else {
            return None;
        };
        match body.get("detail")? {
            Value::String(detail) => Some(detail.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for ClientError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Token storage error: {:?}", err);
        ClientError::Storage(format!("Database error: {}", err))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
