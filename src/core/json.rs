/*!
 * JSON Serialization
 * Snapshot and configuration encoding for presentation layers
 */

use serde::{de::DeserializeOwned, Serialize};

/// Result type for JSON operations
pub type JsonResult<T> = Result<T, JsonError>;

/// JSON operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ============================================================================
// Serialization Functions
// ============================================================================

/// Serialize to a compact JSON string
#[inline]
pub fn to_string<T: Serialize>(value: &T) -> JsonResult<String> {
    serde_json::to_string(value).map_err(|e| JsonError::Serialization(e.to_string()))
}

/// Serialize to pretty-printed JSON string
#[inline]
pub fn to_string_pretty<T: Serialize>(value: &T) -> JsonResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| JsonError::Serialization(e.to_string()))
}

// ============================================================================
// Deserialization Functions
// ============================================================================

/// Deserialize from JSON bytes
#[inline]
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> JsonResult<T> {
    serde_json::from_slice(bytes).map_err(|e| JsonError::Deserialization(e.to_string()))
}

/// Deserialize from JSON string
#[inline]
pub fn from_str<T: DeserializeOwned>(s: &str) -> JsonResult<T> {
    serde_json::from_str(s).map_err(|e| JsonError::Deserialization(e.to_string()))
}
