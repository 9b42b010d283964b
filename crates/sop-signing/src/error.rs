//! Error types for SOP Signing

use sop_core::UnsupportedSchemeError;
use thiserror::Error;

/// Errors that can occur while signing an envelope
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// The `sign_type` tag named a scheme the gateway does not define.
    #[error(transparent)]
    UnsupportedScheme(#[from] UnsupportedSchemeError),

    /// The key material did not parse as a PKCS#8 RSA private key.
    #[error("invalid private key: {0}")]
    InvalidKey(String),
}
