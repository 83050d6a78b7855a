/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export subsystem errors
pub use crate::core::config::ConfigError;
pub use crate::core::json::JsonError;
pub use crate::memory::MemoryError;

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error("Memory error: {0}")]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    #[diagnostic(
        code(memsim::json_error),
        help("Snapshot or configuration could not be encoded or decoded.")
    )]
    Json(#[from] JsonError),
}

/// Serializable error representation for presentation layers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SerializableError {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<&SimError> for SerializableError {
    fn from(err: &SimError) -> Self {
        let error_type = match err {
            SimError::Memory(_) => "memory_error",
            SimError::Config(_) => "config_error",
            SimError::Json(_) => "json_error",
        };
        Self {
            error_type: error_type.to_string(),
            message: err.to_string(),
            code: err.code().map(|c| c.to_string()),
        }
    }
}

impl From<MemoryError> for SerializableError {
    fn from(err: MemoryError) -> Self {
        SerializableError::from(&SimError::from(err))
    }
}
