/*!
 * Core Module
 * Fundamental simulator types, configuration and error handling
 */

pub mod config;
pub mod errors;
pub mod json;
pub mod limits;
pub mod slicing;
pub mod types;

// Re-export for convenience
pub use config::{ConfigError, SimulatorConfig};
pub use errors::*;
pub use slicing::{page_count, paginate, slice_range};
pub use types::*;
