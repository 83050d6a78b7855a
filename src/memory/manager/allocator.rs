/*!
 * Memory Allocator Implementation
 * Allocation logic for contiguous, paged and segmented memory
 */

use super::super::types::{
    AllocationRequest, MemoryError, MemoryMode, MemoryPressure, MemoryResult, PageTableEntry,
    Process, ProcessLayout, Segment, SegmentRequest,
};
use super::{MemoryManager, ModeTables};
use crate::core::types::{units_for, Kilobytes, ProcessId};
use crate::monitoring::span_operation;
use tracing::{info, warn};

impl MemoryManager {
    /// Allocate memory for a new process using the active mode
    ///
    /// Either the whole request is placed and the new process returned, or
    /// memory is left exactly as it was.
    pub fn allocate(&mut self, request: AllocationRequest) -> MemoryResult<Process> {
        let span = span_operation("allocate");
        let _entered = span.enter();

        if let Err(e) = validate_request(&request, self.mode()) {
            span.record_error(&e.to_string());
            warn!(
                mode = %self.mode(),
                size = request.size,
                error = %e,
                "Rejected allocation request"
            );
            return Err(e);
        }

        let result = match self.mode() {
            MemoryMode::Contiguous => self.allocate_contiguous(request.size),
            MemoryMode::Paging => self.allocate_paged(request.size),
            MemoryMode::Segmentation => self.allocate_segmented(request.segment_plan()),
        };

        match &result {
            Ok(process) => {
                span.record_result(true);
                let allocated = self.memory.allocated_count();
                self.session.record_allocation(allocated);
                self.log_allocation(process, allocated);
            }
            Err(e) => {
                span.record_error(&e.to_string());
                self.session.record_failure();
                warn!(mode = %self.mode(), size = request.size, error = %e, "Allocation failed");
            }
        }

        result
    }

    fn allocate_contiguous(&mut self, size: Kilobytes) -> MemoryResult<Process> {
        let required = units_for(size, self.unit_size());
        let start = self
            .algorithm
            .find_start(&self.memory, required)
            .ok_or_else(|| self.insufficient(size, required))?;

        let id = self.next_process_id();
        self.memory.assign_range(start..start + required, &id, None);

        let process = Process {
            id,
            size,
            layout: ProcessLayout::Contiguous {
                start_block: start,
                block_count: required,
            },
        };
        self.processes.push(process.clone());
        Ok(process)
    }

    fn allocate_paged(&mut self, size: Kilobytes) -> MemoryResult<Process> {
        let required = units_for(size, self.unit_size());
        let frames = self
            .memory
            .first_free_frames(required)
            .ok_or_else(|| self.insufficient(size, required))?;

        let id = self.next_process_id();
        let page_table: Vec<PageTableEntry> = frames
            .iter()
            .enumerate()
            .map(|(logical_page, &frame)| PageTableEntry {
                process_id: id.clone(),
                logical_page,
                physical_frame: frame,
                frame_address: self.memory.blocks()[frame].start_address,
            })
            .collect();

        self.memory.assign_frames(&frames, &id);
        if let ModeTables::Paging { entries } = &mut self.tables {
            entries.extend(page_table.iter().cloned());
        }

        let process = Process {
            id,
            size,
            layout: ProcessLayout::Paging {
                page_table,
                page_count: required,
            },
        };
        self.processes.push(process.clone());
        Ok(process)
    }

    fn allocate_segmented(&mut self, plan: Vec<SegmentRequest>) -> MemoryResult<Process> {
        // Reserve the id without consuming it until every segment is placed
        let id = ProcessId::from_sequence(self.process_seq + 1);
        let mut placed: Vec<Segment> = Vec::with_capacity(plan.len());

        for request in &plan {
            let required = units_for(request.size, self.unit_size());
            let Some(start) = self.algorithm.find_start(&self.memory, required) else {
                for segment in &placed {
                    let end = segment.start_block + segment.block_count;
                    self.memory.release_range(segment.start_block..end);
                }
                info!(
                    process_id = %id,
                    segment = %request.name,
                    rolled_back = placed.len(),
                    "Segment placement failed, rolled back earlier segments"
                );
                return Err(self.insufficient(request.size, required));
            };

            let segment_id = Segment::segment_id(&id, &request.name);
            self.memory
                .assign_range(start..start + required, &id, Some(&segment_id));
            placed.push(Segment {
                id: segment_id,
                name: request.name.clone(),
                size: request.size,
                start_block: start,
                block_count: required,
                process_id: id.clone(),
            });
        }

        let issued = self.next_process_id();
        debug_assert_eq!(issued, id);

        if let ModeTables::Segmentation { segments } = &mut self.tables {
            segments.extend(placed.iter().cloned());
        }

        let process = Process {
            id,
            size: plan.iter().map(|s| s.size).sum(),
            layout: ProcessLayout::Segmentation {
                segment_count: placed.len(),
                segments: placed,
            },
        };
        self.processes.push(process.clone());
        Ok(process)
    }

    fn insufficient(&self, requested: Kilobytes, required_units: usize) -> MemoryError {
        MemoryError::InsufficientSpace {
            requested,
            required_units,
            free_units: self.memory.free_count(),
            mode: self.mode(),
        }
    }

    fn log_allocation(&self, process: &Process, allocated: usize) {
        let total = self.memory.len();
        let usage = if total > 0 {
            allocated as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let pressure = MemoryPressure::from_utilization(usage);

        if pressure >= MemoryPressure::High {
            warn!(
                process_id = %process.id,
                size = process.size,
                units = process.layout.unit_count(),
                usage = %format!("{:.1}%", usage),
                "Memory pressure {}",
                pressure
            );
        } else {
            info!(
                process_id = %process.id,
                mode = %process.mode(),
                size = process.size,
                units = process.layout.unit_count(),
                "Allocated process"
            );
        }
    }
}

/// Reject requests that would place zero blocks
fn validate_request(request: &AllocationRequest, mode: MemoryMode) -> MemoryResult<()> {
    if mode == MemoryMode::Segmentation {
        if request.segments.as_ref().is_some_and(|s| s.is_empty()) {
            return Err(MemoryError::InvalidRequest("segment list is empty".to_string()));
        }
        if let Some(segment) = request.segment_plan().iter().find(|s| s.size == 0) {
            return Err(MemoryError::InvalidRequest(format!(
                "segment '{}' has zero size",
                segment.name
            )));
        }
        return Ok(());
    }

    if request.size == 0 {
        return Err(MemoryError::InvalidRequest(
            "process size must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
