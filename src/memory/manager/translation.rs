/*!
 * Address Translation
 * Logical offsets resolved through the owning process's placement
 */

use super::super::types::{MemoryError, MemoryMode, MemoryResult, ProcessLayout};
use super::MemoryManager;
use crate::core::types::{Address, Kilobytes, ProcessId};

impl MemoryManager {
    /// Physical address of `offset` KB into a contiguous or paged process
    pub fn translate(&self, process_id: &ProcessId, offset: Kilobytes) -> MemoryResult<Address> {
        let process = self
            .process(process_id)
            .ok_or_else(|| MemoryError::NotFound(process_id.clone()))?;

        let limit_check = |limit: Kilobytes| {
            if offset >= limit {
                Err(MemoryError::AddressOutOfRange {
                    process_id: process_id.clone(),
                    offset,
                    limit,
                })
            } else {
                Ok(())
            }
        };

        let unit = self.unit_size();
        match &process.layout {
            ProcessLayout::Contiguous { start_block, .. } => {
                limit_check(process.size)?;
                Ok(start_block * unit + offset)
            }
            ProcessLayout::Paging { page_table, .. } => {
                limit_check(process.size)?;
                let entry = &page_table[offset / unit];
                Ok(entry.frame_address + offset % unit)
            }
            ProcessLayout::Segmentation { .. } => Err(MemoryError::ModeMismatch {
                process_id: process_id.clone(),
                actual: MemoryMode::Segmentation,
                operation: "translate".to_string(),
            }),
        }
    }

    /// Physical address of `offset` KB into a named segment
    pub fn translate_segment(
        &self,
        process_id: &ProcessId,
        segment: &str,
        offset: Kilobytes,
    ) -> MemoryResult<Address> {
        let process = self
            .process(process_id)
            .ok_or_else(|| MemoryError::NotFound(process_id.clone()))?;

        let segments = process.segments().ok_or_else(|| MemoryError::ModeMismatch {
            process_id: process_id.clone(),
            actual: process.mode(),
            operation: "translate_segment".to_string(),
        })?;

        let found = segments
            .iter()
            .find(|s| s.name == segment)
            .ok_or_else(|| MemoryError::SegmentNotFound {
                process_id: process_id.clone(),
                segment: segment.to_string(),
            })?;

        if offset >= found.size {
            return Err(MemoryError::AddressOutOfRange {
                process_id: process_id.clone(),
                offset,
                limit: found.size,
            });
        }
        Ok(found.start_block * self.unit_size() + offset)
    }
}
