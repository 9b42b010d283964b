//! Request envelope assembly.
//!
//! Every gateway operation carries the same eight required fields; only
//! `method`, `version`, and the JSON-serialized business arguments
//! vary per call.

use serde::Serialize;
use sop_core::timestamp::now_timestamp;
use sop_core::types::*;
use sop_core::{RequestEnvelope, SigningScheme};

use crate::error::SopClientError;

/// Build an unsigned request envelope for one gateway operation.
///
/// # Errors
///
/// Returns `SopClientError::Json` if the business arguments fail to
/// serialize.
pub fn assemble_envelope<T: Serialize>(
    app_id: &str,
    method: &str,
    version: &str,
    scheme: SigningScheme,
    biz_args: &T,
) -> Result<RequestEnvelope, SopClientError> {
    let biz_content = serde_json::to_string(biz_args)?;

    let mut envelope = RequestEnvelope::new();
    envelope.insert(FIELD_APP_ID, app_id);
    envelope.insert(FIELD_METHOD, method);
    envelope.insert(FIELD_FORMAT, FORMAT_JSON);
    envelope.insert(FIELD_CHARSET, CHARSET_UTF8);
    envelope.insert(FIELD_SIGN_TYPE, scheme.as_str());
    envelope.insert(FIELD_TIMESTAMP, now_timestamp());
    envelope.insert(FIELD_VERSION, version);
    envelope.insert(FIELD_BIZ_CONTENT, biz_content);
    Ok(envelope)
}
