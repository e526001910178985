//! Database value-marshalling helpers.
//!
//! Bridges between optional domain values and their SQLite TEXT-column
//! encodings, shared by the application's stores: RFC3339 timestamps,
//! JSON payloads stored as raw text, and empty-string-as-NULL
//! normalization for nullable columns.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

/// Encode a timestamp for a TEXT column.
pub fn timestamp_to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

/// Decode a timestamp from a TEXT column.
pub fn timestamp_from_db(raw: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidTimestamp(format!("{}: {}", raw, e)))
}

/// Encode an optional timestamp for a nullable TEXT column.
pub fn opt_timestamp_to_db(ts: Option<&DateTime<Utc>>) -> Option<String> {
    ts.map(timestamp_to_db)
}

/// Decode an optional timestamp from a nullable TEXT column.
pub fn opt_timestamp_from_db(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, DbError> {
    raw.map(timestamp_from_db).transpose()
}

/// Serialize a JSON value for a TEXT column.
pub fn json_to_db(value: &serde_json::Value) -> Result<String, DbError> {
    serde_json::to_string(value).map_err(|e| DbError::InvalidJson(e.to_string()))
}

/// Deserialize a JSON value from a TEXT column.
pub fn json_from_db(raw: &str) -> Result<serde_json::Value, DbError> {
    serde_json::from_str(raw).map_err(|e| DbError::InvalidJson(e.to_string()))
}

/// Serialize an optional JSON value for a nullable TEXT column.
pub fn opt_json_to_db(value: Option<&serde_json::Value>) -> Result<Option<String>, DbError> {
    value.map(json_to_db).transpose()
}

/// Deserialize an optional JSON value from a nullable TEXT column.
pub fn opt_json_from_db(raw: Option<&str>) -> Result<Option<serde_json::Value>, DbError> {
    raw.map(json_from_db).transpose()
}

/// Normalize an optional string for a nullable TEXT column.
///
/// Empty strings are stored as NULL so the two "no value" encodings stay
/// indistinguishable at the database level.
pub fn opt_text_to_db(text: Option<&str>) -> Option<String> {
    match text {
        Some(t) if !t.is_empty() => Some(t.to_string()),
        _ => None,
    }
}

/// Read a nullable TEXT column back into an optional string.
///
/// NULL and empty both map to `None`.
pub fn opt_text_from_db(raw: Option<String>) -> Option<String> {
    raw.filter(|t| !t.is_empty())
}
