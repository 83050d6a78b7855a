/*!
 * Shared Memory Manager
 * One exclusive-access boundary around an engine for concurrent callers
 */

use super::manager::MemoryManager;
use super::traits::MemoryInfo;
use super::types::{
    AllocationRequest, Block, MemoryMode, MemoryResult, MemorySnapshot, MemoryStats,
    PlacementAlgorithm, Process,
};
use crate::core::types::{Kilobytes, ProcessId};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to a single engine
///
/// Every operation takes the whole-engine lock; operations are short, so no
/// finer-grained locking is attempted.
#[derive(Clone, Default)]
pub struct SharedMemoryManager {
    inner: Arc<Mutex<MemoryManager>>,
}

impl SharedMemoryManager {
    pub fn new(manager: MemoryManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut MemoryManager) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn initialize(
        &self,
        mode: MemoryMode,
        total_memory: Kilobytes,
        unit_size: Kilobytes,
    ) -> MemoryResult<Vec<Block>> {
        self.with(|m| m.initialize(mode, total_memory, unit_size).map(<[_]>::to_vec))
    }

    pub fn set_algorithm(&self, algorithm: PlacementAlgorithm) {
        self.with(|m| m.set_algorithm(algorithm))
    }

    pub fn allocate(&self, request: impl Into<AllocationRequest>) -> MemoryResult<Process> {
        let request = request.into();
        self.with(|m| m.allocate(request))
    }

    pub fn deallocate(&self, process_id: &ProcessId) -> MemoryResult<()> {
        self.with(|m| m.deallocate(process_id))
    }

    pub fn stats(&self) -> MemoryStats {
        self.inner.lock().stats()
    }

    pub fn processes(&self) -> Vec<Process> {
        self.inner.lock().processes().to_vec()
    }

    pub fn snapshot(&self) -> MemorySnapshot {
        self.inner.lock().snapshot()
    }
}

impl MemoryInfo for SharedMemoryManager {
    fn stats(&self) -> MemoryStats {
        SharedMemoryManager::stats(self)
    }

    fn info(&self) -> (Kilobytes, Kilobytes, Kilobytes) {
        self.inner.lock().info()
    }

    fn process_memory(&self, process_id: &ProcessId) -> Kilobytes {
        self.inner.lock().process_memory(process_id)
    }
}
