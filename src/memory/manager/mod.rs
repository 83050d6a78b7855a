/*!
 * Memory Management
 *
 * Allocation engine for the three simulated memory organisations.
 *
 * ## Memory Modes
 *
 * - **Contiguous**: each process occupies one run of blocks chosen by the
 *   placement algorithm (first, best or worst fit)
 * - **Paging**: each process receives the lowest-indexed free frames, not
 *   necessarily adjacent, recorded in a per-process page table
 * - **Segmentation**: each named segment is placed as its own contiguous run;
 *   a failing segment rolls back the whole request
 *
 * ## Features
 *
 * - **Owned state**: every `MemoryManager` is an independent simulation
 * - **Immediate reuse**: freed blocks are visible to the next scan, no coalescing pass
 * - **Fragmentation accounting**: isolated single-block gaps between processes
 * - **Memory pressure tracking**: warns at 80%, critical at 95%
 * - **Address translation**: logical offsets resolved through the mode's table
 */

mod allocator;
mod placement;
mod process_ops;
mod storage;
mod tracking;
mod translation;

use super::traits::{Allocator, MemoryInfo};
use super::types::{
    AllocationRequest, Block, MemoryError, MemoryMode, MemoryResult, MemoryStats,
    PageTableEntry, PlacementAlgorithm, Process, Segment,
};
use crate::core::config::SimulatorConfig;
use crate::core::types::{Kilobytes, ProcessId, SimResult};
use storage::PhysicalMemory;
use tracing::info;
use tracking::SessionTracking;

/// Bookkeeping table kept by the active mode
#[derive(Debug, Clone)]
enum ModeTables {
    Contiguous,
    Paging { entries: Vec<PageTableEntry> },
    Segmentation { segments: Vec<Segment> },
}

impl ModeTables {
    fn empty(mode: MemoryMode) -> Self {
        match mode {
            MemoryMode::Contiguous => ModeTables::Contiguous,
            MemoryMode::Paging => ModeTables::Paging {
                entries: Vec::new(),
            },
            MemoryMode::Segmentation => ModeTables::Segmentation {
                segments: Vec::new(),
            },
        }
    }

    fn mode(&self) -> MemoryMode {
        match self {
            ModeTables::Contiguous => MemoryMode::Contiguous,
            ModeTables::Paging { .. } => MemoryMode::Paging,
            ModeTables::Segmentation { .. } => MemoryMode::Segmentation,
        }
    }
}

/// Memory allocation engine
#[derive(Debug, Clone)]
pub struct MemoryManager {
    memory: PhysicalMemory,
    tables: ModeTables,
    processes: Vec<Process>,
    algorithm: PlacementAlgorithm,
    total_memory: Kilobytes,
    // Last issued process sequence number; ids are never reused within a session
    process_seq: u64,
    session: SessionTracking,
}

impl MemoryManager {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        let config = SimulatorConfig::default();
        let mut manager = Self::empty(config.algorithm);
        manager.reset(config.mode, config.total_memory, config.unit_size());
        manager
    }

    /// Create an initialized engine from a configuration
    ///
    /// The configuration is validated first, so a bad one surfaces as
    /// `SimError::Config` rather than a memory error.
    pub fn from_config(config: &SimulatorConfig) -> SimResult<Self> {
        config.validate()?;
        let mut manager = Self::empty(config.algorithm);
        manager.initialize(config.mode, config.total_memory, config.unit_size())?;
        Ok(manager)
    }

    fn empty(algorithm: PlacementAlgorithm) -> Self {
        Self {
            memory: PhysicalMemory::default(),
            tables: ModeTables::Contiguous,
            processes: Vec::new(),
            algorithm,
            total_memory: 0,
            process_seq: 0,
            session: SessionTracking::new(),
        }
    }

    /// Rebuild memory from scratch, discarding every process and table row
    ///
    /// `unit_size` is the block size for contiguous and segmented memory and
    /// the page size for paged memory. On error the previous state is kept.
    pub fn initialize(
        &mut self,
        mode: MemoryMode,
        total_memory: Kilobytes,
        unit_size: Kilobytes,
    ) -> MemoryResult<&[Block]> {
        if unit_size == 0 {
            return Err(MemoryError::InvalidConfig(
                "unit size must be greater than zero".to_string(),
            ));
        }
        if unit_size > total_memory {
            return Err(MemoryError::InvalidConfig(format!(
                "unit size {} KB exceeds total memory {} KB",
                unit_size, total_memory
            )));
        }

        self.reset(mode, total_memory, unit_size);
        Ok(self.memory.blocks())
    }

    fn reset(&mut self, mode: MemoryMode, total_memory: Kilobytes, unit_size: Kilobytes) {
        self.memory = PhysicalMemory::partition(total_memory, unit_size);
        self.tables = ModeTables::empty(mode);
        self.processes.clear();
        self.total_memory = total_memory;
        self.process_seq = 0;
        self.session = SessionTracking::new();

        info!(
            mode = %mode,
            total_memory,
            unit_size,
            blocks = self.memory.len(),
            "Memory initialized"
        );
    }

    /// Change the placement algorithm without touching memory
    pub fn set_algorithm(&mut self, algorithm: PlacementAlgorithm) {
        if self.algorithm != algorithm {
            info!(from = %self.algorithm, to = %algorithm, "Placement algorithm changed");
        }
        self.algorithm = algorithm;
    }

    pub fn algorithm(&self) -> PlacementAlgorithm {
        self.algorithm
    }

    pub fn mode(&self) -> MemoryMode {
        self.tables.mode()
    }

    /// Block size, or page size in paging mode
    pub fn unit_size(&self) -> Kilobytes {
        self.memory.unit_size()
    }

    /// Configured total memory (may exceed the partitioned blocks)
    pub fn total_memory(&self) -> Kilobytes {
        self.total_memory
    }

    fn next_process_id(&mut self) -> ProcessId {
        self.process_seq += 1;
        ProcessId::from_sequence(self.process_seq)
    }
}

impl Allocator for MemoryManager {
    fn allocate(&mut self, request: AllocationRequest) -> MemoryResult<Process> {
        MemoryManager::allocate(self, request)
    }

    fn deallocate(&mut self, process_id: &ProcessId) -> MemoryResult<()> {
        MemoryManager::deallocate(self, process_id)
    }

    fn mode(&self) -> MemoryMode {
        MemoryManager::mode(self)
    }
}

impl MemoryInfo for MemoryManager {
    fn stats(&self) -> MemoryStats {
        MemoryManager::stats(self)
    }

    fn info(&self) -> (Kilobytes, Kilobytes, Kilobytes) {
        MemoryManager::info(self)
    }

    fn process_memory(&self, process_id: &ProcessId) -> Kilobytes {
        MemoryManager::process_memory(self, process_id)
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}
