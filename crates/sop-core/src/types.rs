//! SOP Envelope Types
//!
//! Type definitions for the open-platform request envelope: the flat
//! field map sent to the gateway, the tagged field value, and the
//! signing scheme negotiated through `sign_type`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Envelope field names defined by the gateway protocol.
pub const FIELD_APP_ID: &str = "app_id";
pub const FIELD_METHOD: &str = "method";
pub const FIELD_FORMAT: &str = "format";
pub const FIELD_CHARSET: &str = "charset";
pub const FIELD_SIGN_TYPE: &str = "sign_type";
pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_VERSION: &str = "version";
pub const FIELD_BIZ_CONTENT: &str = "biz_content";
pub const FIELD_SIGN: &str = "sign";

/// Fields every request must carry before signing.
pub const REQUIRED_FIELDS: [&str; 8] = [
    FIELD_APP_ID,
    FIELD_METHOD,
    FIELD_FORMAT,
    FIELD_CHARSET,
    FIELD_SIGN_TYPE,
    FIELD_TIMESTAMP,
    FIELD_VERSION,
    FIELD_BIZ_CONTENT,
];

/// Fixed protocol values.
pub const FORMAT_JSON: &str = "json";
pub const CHARSET_UTF8: &str = "UTF-8";
pub const DEFAULT_VERSION: &str = "1.0";

/// A single envelope field value.
///
/// The gateway accepts scalar fields and at most one level of nesting;
/// nested children are always scalar strings, so deeper nesting is
/// unrepresentable by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    Nested(BTreeMap<String, String>),
}

impl FieldValue {
    /// The scalar content, or `None` for a nested mapping.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::Nested(_) => None,
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, FieldValue::Nested(_))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<BTreeMap<String, String>> for FieldValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        FieldValue::Nested(value)
    }
}

/// The full set of named request fields sent to the gateway,
/// including the signature once computed.
///
/// Field order is irrelevant to the protocol; a `BTreeMap` keeps
/// serialization deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RequestEnvelope {
    fields: BTreeMap<String, FieldValue>,
}

impl RequestEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// The scalar value of a field, or `None` if absent or nested.
    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::as_scalar)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The paired hash and signature algorithm selected by `sign_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SigningScheme {
    /// SHA-1 with RSA (`sign_type = "RSA"`).
    Rsa,
    /// SHA-256 with RSA (`sign_type = "RSA2"`).
    Rsa2,
}

impl SigningScheme {
    /// The wire value carried in the envelope's `sign_type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningScheme::Rsa => "RSA",
            SigningScheme::Rsa2 => "RSA2",
        }
    }

    /// The JCA-style algorithm name the gateway documents.
    pub fn algorithm_name(&self) -> &'static str {
        match self {
            SigningScheme::Rsa => "SHA1withRSA",
            SigningScheme::Rsa2 => "SHA256withRSA",
        }
    }
}

impl fmt::Display for SigningScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unrecognized `sign_type` tag.
///
/// Must surface as an error: a request with an unsigned envelope must
/// never reach transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported sign_type '{0}', expected RSA or RSA2")]
pub struct UnsupportedSchemeError(pub String);

impl FromStr for SigningScheme {
    type Err = UnsupportedSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RSA" => Ok(SigningScheme::Rsa),
            "RSA2" => Ok(SigningScheme::Rsa2),
            _ => Err(UnsupportedSchemeError(s.to_string())),
        }
    }
}
