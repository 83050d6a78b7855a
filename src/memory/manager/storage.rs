/*!
 * Physical Memory Storage
 * Fixed-size block array shared by every memory mode
 */

use super::super::types::Block;
use crate::core::types::{BlockIndex, Kilobytes, ProcessId};
use std::ops::Range;

/// Maximal run of free blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FreeRun {
    pub start: BlockIndex,
    pub len: usize,
}

/// Ordered, gap-free array of equally sized blocks
#[derive(Debug, Clone, Default)]
pub(super) struct PhysicalMemory {
    blocks: Vec<Block>,
    unit_size: Kilobytes,
}

impl PhysicalMemory {
    /// Partition `total` KB into `floor(total / unit_size)` blocks
    pub fn partition(total: Kilobytes, unit_size: Kilobytes) -> Self {
        let count = if unit_size == 0 { 0 } else { total / unit_size };
        Self {
            blocks: (0..count).map(|id| Block::new(id, unit_size)).collect(),
            unit_size,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn unit_size(&self) -> Kilobytes {
        self.unit_size
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn allocated_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_allocated()).count()
    }

    pub fn free_count(&self) -> usize {
        self.blocks.len() - self.allocated_count()
    }

    /// True when every block in `range` exists and is free
    pub fn is_range_free(&self, range: Range<BlockIndex>) -> bool {
        range.end <= self.blocks.len() && self.blocks[range].iter().all(|b| !b.is_allocated())
    }

    /// Maximal free runs in address order
    pub fn free_runs(&self) -> Vec<FreeRun> {
        let mut runs = Vec::new();
        let mut index = 0;

        while index < self.blocks.len() {
            if self.blocks[index].is_allocated() {
                index += 1;
                continue;
            }
            let start = index;
            while index < self.blocks.len() && !self.blocks[index].is_allocated() {
                index += 1;
            }
            runs.push(FreeRun {
                start,
                len: index - start,
            });
        }
        runs
    }

    /// First `count` free frames in index order, or `None` if fewer exist
    pub fn first_free_frames(&self, count: usize) -> Option<Vec<BlockIndex>> {
        let frames: Vec<BlockIndex> = self
            .blocks
            .iter()
            .filter(|b| !b.is_allocated())
            .map(|b| b.id)
            .take(count)
            .collect();
        (frames.len() == count).then_some(frames)
    }

    pub fn assign_range(
        &mut self,
        range: Range<BlockIndex>,
        owner: &ProcessId,
        segment_id: Option<&str>,
    ) {
        for block in &mut self.blocks[range] {
            block.assign(owner, segment_id);
        }
    }

    pub fn assign_frames(&mut self, frames: &[BlockIndex], owner: &ProcessId) {
        for &frame in frames {
            self.blocks[frame].assign(owner, None);
        }
    }

    pub fn release_range(&mut self, range: Range<BlockIndex>) {
        for block in &mut self.blocks[range] {
            block.free();
        }
    }

    /// Free every block owned by `owner`, returning how many were released
    pub fn release_owner(&mut self, owner: &ProcessId) -> usize {
        let mut released = 0;
        for block in self.blocks.iter_mut().filter(|b| b.is_owned_by(owner)) {
            block.free();
            released += 1;
        }
        released
    }

    /// Free blocks isolated between allocations of two different processes
    pub fn count_isolated_gaps(&self) -> usize {
        self.blocks
            .windows(3)
            .filter(|w| {
                !w[1].is_allocated()
                    && w[0].is_allocated()
                    && w[2].is_allocated()
                    && w[0].process_id != w[2].process_id
            })
            .count()
    }
}
