//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Envelope for JSON output: the payload plus when and by which version it
/// was produced.
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// RFC 3339 timestamp
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}
