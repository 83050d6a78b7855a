/*!
 * Memory Module
 * Memory model, placement algorithms and allocation engine
 */

pub mod manager;
pub mod shared;
pub mod traits;
pub mod types;
pub mod workload;

// Re-export for convenience
pub use manager::MemoryManager;
pub use shared::SharedMemoryManager;
pub use traits::*;
pub use types::*;
pub use workload::{random_requests, run_random_workload, run_workload};
