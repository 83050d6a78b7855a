/*!
 * Memory Strategy Simulator
 * Teaching engine for contiguous, paged and segmented memory allocation
 */

pub mod core;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use crate::core::{ConfigError, SimError, SimResult, SimulatorConfig};
pub use memory::{
    AllocationRequest, MemoryError, MemoryManager, MemoryMode, MemoryStats, PlacementAlgorithm,
    SegmentRequest, SharedMemoryManager,
};
pub use monitoring::init_tracing;
