/*!
 * Session Tracking
 * Allocation activity counters since the last initialization
 */

use super::super::types::SessionStats;

#[derive(Debug, Clone, Default)]
pub(super) struct SessionTracking {
    allocations: usize,
    failed_allocations: usize,
    deallocations: usize,
    peak_allocated_blocks: usize,
}

impl SessionTracking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_allocation(&mut self, allocated_blocks: usize) {
        self.allocations += 1;
        if allocated_blocks > self.peak_allocated_blocks {
            self.peak_allocated_blocks = allocated_blocks;
        }
    }

    pub fn record_failure(&mut self) {
        self.failed_allocations += 1;
    }

    pub fn record_deallocation(&mut self) {
        self.deallocations += 1;
    }

    pub fn snapshot(&self) -> SessionStats {
        SessionStats {
            allocations: self.allocations,
            failed_allocations: self.failed_allocations,
            deallocations: self.deallocations,
            peak_allocated_blocks: self.peak_allocated_blocks,
        }
    }
}
