//! # SOP Core
//!
//! Core types and validation for the SOP open-platform request envelope.
//!
//! This crate provides:
//! - Type definitions for the request envelope and its field values
//! - The `sign_type` scheme enumeration
//! - Envelope validation
//! - Wire timestamp rendering
//!
//! ## Example
//!
//! ```rust
//! use sop_core::{RequestEnvelope, SigningScheme, validate_envelope};
//! use sop_core::types::*;
//!
//! let mut envelope = RequestEnvelope::new();
//! envelope.insert(FIELD_APP_ID, "2021000100");
//! envelope.insert(FIELD_METHOD, "map.download");
//! envelope.insert(FIELD_FORMAT, FORMAT_JSON);
//! envelope.insert(FIELD_CHARSET, CHARSET_UTF8);
//! envelope.insert(FIELD_SIGN_TYPE, SigningScheme::Rsa2.as_str());
//! envelope.insert(FIELD_TIMESTAMP, sop_core::timestamp::now_timestamp());
//! envelope.insert(FIELD_VERSION, DEFAULT_VERSION);
//! envelope.insert(FIELD_BIZ_CONTENT, "{}");
//!
//! validate_envelope(&envelope).unwrap();
//! ```

pub mod timestamp;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use types::{
    FieldValue, RequestEnvelope, SigningScheme, UnsupportedSchemeError,
};
pub use validation::{validate_envelope, ValidationError};
