//! Gateway response unwrapping.
//!
//! The gateway nests each operation's payload under a key derived from
//! the method name: dots become underscores and `_response` is
//! appended (`map.download` -> `map_download_response`).

use serde_json::Value;

use crate::error::SopClientError;

/// The response key the gateway uses for a method name.
pub fn response_data_key(method: &str) -> String {
    format!("{}_response", method.replace('.', "_"))
}

/// Extract the payload for `method` from a gateway response body.
///
/// # Errors
///
/// Returns `SopClientError::MissingResponseKey` if the body does not
/// carry the derived key.
pub fn unwrap_response(method: &str, mut body: Value) -> Result<Value, SopClientError> {
    let key = response_data_key(method);
    body.get_mut(&key)
        .map(Value::take)
        .ok_or(SopClientError::MissingResponseKey(key))
}
