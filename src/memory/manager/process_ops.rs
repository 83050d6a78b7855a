/*!
 * Process Memory Operations
 * Deallocation, statistics and read-only queries
 */

use super::super::types::{
    Block, MemoryError, MemoryMode, MemoryResult, MemorySnapshot, MemoryStats, PageTableEntry,
    Process, Segment, SessionStats,
};
use super::{MemoryManager, ModeTables};
use crate::core::limits::DEFAULT_ITEMS_PER_PAGE;
use crate::core::slicing::{page_count, paginate, slice_range};
use crate::core::types::{Kilobytes, ProcessId};
use crate::monitoring::span_operation;
use std::ops::Range;
use tracing::{info, warn};

impl MemoryManager {
    /// Release a process and every table row and block it owns
    pub fn deallocate(&mut self, process_id: &ProcessId) -> MemoryResult<()> {
        let span = span_operation("deallocate");
        let _entered = span.enter();

        let Some(position) = self.processes.iter().position(|p| &p.id == process_id) else {
            span.record_error("not found");
            warn!(process_id = %process_id, "Attempted to deallocate unknown process");
            return Err(MemoryError::NotFound(process_id.clone()));
        };

        let removed_rows = match &mut self.tables {
            ModeTables::Contiguous => 0,
            ModeTables::Paging { entries } => {
                let before = entries.len();
                entries.retain(|e| &e.process_id != process_id);
                before - entries.len()
            }
            ModeTables::Segmentation { segments } => {
                let before = segments.len();
                segments.retain(|s| &s.process_id != process_id);
                before - segments.len()
            }
        };

        let freed_blocks = self.memory.release_owner(process_id);
        let process = self.processes.remove(position);
        self.session.record_deallocation();
        span.record_result(true);

        info!(
            process_id = %process_id,
            mode = %process.mode(),
            freed_blocks,
            removed_rows,
            free_blocks = self.memory.free_count(),
            "Deallocated process"
        );
        Ok(())
    }

    /// Get detailed memory statistics
    pub fn stats(&self) -> MemoryStats {
        let total_blocks = self.memory.len();
        let allocated_blocks = self.memory.allocated_count();
        let unit_size = self.unit_size();

        let utilization_rate = if total_blocks > 0 {
            allocated_blocks as f64 / total_blocks as f64 * 100.0
        } else {
            0.0
        };

        let (page_count, page_size, segment_count) = match &self.tables {
            ModeTables::Contiguous => (None, None, None),
            ModeTables::Paging { entries } => (Some(entries.len()), Some(unit_size), None),
            ModeTables::Segmentation { segments } => (None, None, Some(segments.len())),
        };

        MemoryStats {
            utilization_rate,
            used_memory: allocated_blocks * unit_size,
            total_memory: self.total_memory,
            active_processes: self.processes.len(),
            fragmented_blocks: self.fragmented_blocks(),
            memory_type: self.mode(),
            unit_size,
            total_blocks,
            allocated_blocks,
            free_blocks: total_blocks - allocated_blocks,
            page_count,
            page_size,
            segment_count,
        }
    }

    /// Isolated single free blocks between two different processes
    ///
    /// Always zero for paged memory, where placement is frame-granular.
    pub fn fragmented_blocks(&self) -> usize {
        match self.mode() {
            MemoryMode::Paging => 0,
            MemoryMode::Contiguous | MemoryMode::Segmentation => {
                self.memory.count_isolated_gaps()
            }
        }
    }

    /// Get overall memory info: (total, used, available)
    pub fn info(&self) -> (Kilobytes, Kilobytes, Kilobytes) {
        let used = self.memory.allocated_count() * self.unit_size();
        (
            self.total_memory,
            used,
            self.memory.len() * self.unit_size() - used,
        )
    }

    /// Memory reserved by a process, rounded up to whole blocks
    pub fn process_memory(&self, process_id: &ProcessId) -> Kilobytes {
        self.memory
            .blocks()
            .iter()
            .filter(|b| b.is_owned_by(process_id))
            .count()
            * self.unit_size()
    }

    pub fn session(&self) -> SessionStats {
        self.session.snapshot()
    }

    pub fn blocks(&self) -> &[Block] {
        self.memory.blocks()
    }

    /// Blocks in an ordinal range, clamped to the block count
    pub fn blocks_in(&self, range: Range<usize>) -> &[Block] {
        slice_range(self.memory.blocks(), range)
    }

    /// 1-based page of the block list, `DEFAULT_ITEMS_PER_PAGE` blocks per page
    pub fn block_page(&self, page: usize) -> &[Block] {
        paginate(self.memory.blocks(), page, DEFAULT_ITEMS_PER_PAGE)
    }

    pub fn block_page_count(&self) -> usize {
        page_count(self.memory.len(), DEFAULT_ITEMS_PER_PAGE)
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Processes in an ordinal range, clamped to the process count
    pub fn processes_in(&self, range: Range<usize>) -> &[Process] {
        slice_range(&self.processes, range)
    }

    pub fn process(&self, process_id: &ProcessId) -> Option<&Process> {
        self.processes.iter().find(|p| &p.id == process_id)
    }

    /// Blocks currently owned by a process, in address order
    pub fn process_blocks(&self, process_id: &ProcessId) -> Vec<&Block> {
        self.memory
            .blocks()
            .iter()
            .filter(|b| b.is_owned_by(process_id))
            .collect()
    }

    /// Flat page table of every paged process; `None` outside paging mode
    pub fn page_table_entries(&self) -> Option<&[PageTableEntry]> {
        match &self.tables {
            ModeTables::Paging { entries } => Some(entries),
            _ => None,
        }
    }

    /// Segment table of every segmented process; `None` outside segmentation mode
    pub fn segment_table(&self) -> Option<&[Segment]> {
        match &self.tables {
            ModeTables::Segmentation { segments } => Some(segments),
            _ => None,
        }
    }

    /// Owned copy of the full engine state
    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            mode: self.mode(),
            algorithm: self.algorithm,
            unit_size: self.unit_size(),
            blocks: self.memory.blocks().to_vec(),
            processes: self.processes.clone(),
            page_table_entries: self.page_table_entries().map(<[_]>::to_vec),
            segment_table: self.segment_table().map(<[_]>::to_vec),
            stats: self.stats(),
            session: self.session(),
        }
    }
}
