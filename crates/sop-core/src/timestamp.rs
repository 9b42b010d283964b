//! Envelope timestamp rendering.
//!
//! The gateway expects local wall-clock time in the fixed
//! `yyyy-MM-dd HH:mm:ss` pattern.

use chrono::{DateTime, Local};

/// chrono equivalent of the gateway's `yyyy-MM-dd HH:mm:ss` pattern.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp in the envelope wire format.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// The current local time in the envelope wire format.
pub fn now_timestamp() -> String {
    format_timestamp(Local::now())
}
