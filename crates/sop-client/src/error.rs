//! Error types for the SOP gateway client

use sop_core::ValidationError;
use sop_signing::SigningError;
use thiserror::Error;

/// Errors that can occur while executing a gateway operation
#[derive(Debug, Error)]
pub enum SopClientError {
    #[error("signing error: {0}")]
    Signing(#[from] SigningError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("gateway response is missing key '{0}'")]
    MissingResponseKey(String),
}
