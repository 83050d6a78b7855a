/*!
 * Memory Traits
 * Memory management abstractions
 */

use super::types::*;
use crate::core::types::{Kilobytes, ProcessId};

/// Process-level allocator interface
pub trait Allocator {
    /// Place a request and record the resulting process
    fn allocate(&mut self, request: AllocationRequest) -> MemoryResult<Process>;

    /// Release every block owned by a process
    fn deallocate(&mut self, process_id: &ProcessId) -> MemoryResult<()>;

    /// Active memory organisation
    fn mode(&self) -> MemoryMode;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Kilobytes, Kilobytes, Kilobytes);

    /// Get memory reserved by a specific process
    fn process_memory(&self, process_id: &ProcessId) -> Kilobytes;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
