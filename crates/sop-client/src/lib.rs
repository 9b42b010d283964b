//! # SOP Client
//!
//! HTTP transport and envelope assembly for the SOP open-platform
//! gateway.
//!
//! This crate provides:
//! - A reqwest-based client holding one application's credentials
//! - Envelope assembly for the eight protocol-required fields
//! - Signing integration (every request is signed before transport)
//! - Response unwrapping by the `{method}_response` key convention
//!
//! ## Example
//!
//! ```ignore
//! use sop_client::SopClient;
//! use serde_json::json;
//!
//! let client = SopClient::new("http://192.168.0.61:8152", app_id, app_key);
//!
//! // JSON operations return the unwrapped response payload
//! let maps = client.map_list(&json!({})).await?;
//!
//! // map.download answers with a raw blob
//! let bytes = client.download_map(&json!({"map_id": "m1"})).await?;
//! ```

mod client;
mod envelope;
mod error;
mod response;

pub use client::{
    SopClient, METHOD_MAP_DOWNLOAD, METHOD_MAP_LIST, METHOD_MAP_LOCATION_UPLOAD,
    METHOD_MAP_NEAREST, METHOD_OFFICIAL_AUTH, METHOD_OFFICIAL_AUTH_TICKET,
};
pub use envelope::assemble_envelope;
pub use error::SopClientError;
pub use response::{response_data_key, unwrap_response};
