//! Envelope Validation
//!
//! Pre-flight checks run before canonicalization. Canonicalization
//! silently drops empty values (the gateway wants omitted, not empty,
//! parameters), so a missing or blank required field would otherwise
//! vanish from the signed string without a trace — validation is the
//! only place that failure mode is surfaced.

use crate::types::{RequestEnvelope, FIELD_APP_ID, FIELD_METHOD, REQUIRED_FIELDS};
use thiserror::Error;

/// Errors that can occur during envelope validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("required field '{0}' is empty")]
    EmptyField(String),

    #[error("required field '{0}' must be a scalar, not a nested mapping")]
    NotScalar(String),
}

/// Validate a request envelope before signing.
///
/// Checks that every protocol-required field is present and that the
/// identifying fields (`app_id`, `method`) are non-empty scalars.
///
/// # Errors
///
/// Returns `ValidationError` if the envelope is malformed.
pub fn validate_envelope(envelope: &RequestEnvelope) -> Result<(), ValidationError> {
    for name in REQUIRED_FIELDS {
        if !envelope.contains(name) {
            return Err(ValidationError::MissingField(name.to_string()));
        }
    }

    for name in [FIELD_APP_ID, FIELD_METHOD] {
        match envelope.scalar(name) {
            Some("") => return Err(ValidationError::EmptyField(name.to_string())),
            Some(_) => {}
            None => return Err(ValidationError::NotScalar(name.to_string())),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn complete_envelope() -> RequestEnvelope {
        let mut envelope = RequestEnvelope::new();
        envelope.insert(FIELD_APP_ID, "2021000100");
        envelope.insert(FIELD_METHOD, "map.download");
        envelope.insert(FIELD_FORMAT, FORMAT_JSON);
        envelope.insert(FIELD_CHARSET, CHARSET_UTF8);
        envelope.insert(FIELD_SIGN_TYPE, "RSA2");
        envelope.insert(FIELD_TIMESTAMP, "2020-11-11 11:11:11");
        envelope.insert(FIELD_VERSION, DEFAULT_VERSION);
        envelope.insert(FIELD_BIZ_CONTENT, "{}");
        envelope
    }

    #[test]
    fn test_complete_envelope_is_valid() {
        assert!(validate_envelope(&complete_envelope()).is_ok());
    }

    #[test]
    fn test_each_required_field_is_checked() {
        for name in REQUIRED_FIELDS {
            let mut envelope = RequestEnvelope::new();
            for other in REQUIRED_FIELDS {
                if other != name {
                    envelope.insert(other, "x");
                }
            }
            assert_eq!(
                validate_envelope(&envelope),
                Err(ValidationError::MissingField(name.to_string()))
            );
        }
    }

    #[test]
    fn test_empty_app_id_is_rejected() {
        let mut envelope = complete_envelope();
        envelope.insert(FIELD_APP_ID, "");
        assert_eq!(
            validate_envelope(&envelope),
            Err(ValidationError::EmptyField(FIELD_APP_ID.to_string()))
        );
    }

    #[test]
    fn test_nested_method_is_rejected() {
        let mut envelope = complete_envelope();
        envelope.insert(
            FIELD_METHOD,
            std::collections::BTreeMap::from([("m".to_string(), "x".to_string())]),
        );
        assert_eq!(
            validate_envelope(&envelope),
            Err(ValidationError::NotScalar(FIELD_METHOD.to_string()))
        );
    }
}
