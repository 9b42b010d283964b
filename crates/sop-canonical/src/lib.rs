//! # SOP Canonical
//!
//! Deterministic sign-content serialization for the SOP open-platform
//! client.
//!
//! The signed string is the `&`-joined, lexicographically sorted
//! `name=value` projection of the request envelope. Getting this byte
//! sequence wrong silently produces a signature the gateway rejects,
//! with no local way to detect the mistake — determinism is the whole
//! point of this crate.
//!
//! ## Canonicalization Rules
//!
//! 1. Field names sorted lexicographically by bytes, case-sensitive
//! 2. Nested mappings contribute their children under the child's own
//!    name; the parent name never appears
//! 3. Empty and nested-mapping values are omitted entirely, never
//!    rendered as `name=`
//! 4. Output joined with `&`, no trailing delimiter
//!
//! ## Example
//!
//! ```rust
//! use sop_canonical::sign_content;
//! use sop_core::RequestEnvelope;
//!
//! let mut envelope = RequestEnvelope::new();
//! envelope.insert("method", "map.download");
//! envelope.insert("app_id", "123");
//! envelope.insert("version", "");
//!
//! // sorted, empty value dropped
//! assert_eq!(sign_content(&envelope), "app_id=123&method=map.download");
//! ```

mod canonical;

pub use canonical::*;
