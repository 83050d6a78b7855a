/*!
 * Contiguous Placement
 * First-fit, best-fit and worst-fit selection over free runs of blocks
 */

use super::super::types::PlacementAlgorithm;
use super::storage::PhysicalMemory;
use crate::core::types::BlockIndex;

impl PlacementAlgorithm {
    /// Pick the first block of a run that can hold `required` blocks
    ///
    /// Returns `None` when no run is long enough. Never mutates memory.
    pub(super) fn find_start(
        &self,
        memory: &PhysicalMemory,
        required: usize,
    ) -> Option<BlockIndex> {
        if required == 0 || required > memory.len() {
            return None;
        }
        match self {
            PlacementAlgorithm::FirstFit => first_fit(memory, required),
            PlacementAlgorithm::BestFit => best_fit(memory, required),
            PlacementAlgorithm::WorstFit => worst_fit(memory, required),
        }
    }
}

/// Leftmost index whose next `required` blocks are all free
fn first_fit(memory: &PhysicalMemory, required: usize) -> Option<BlockIndex> {
    (0..=memory.len() - required).find(|&start| memory.is_range_free(start..start + required))
}

/// Smallest qualifying free run, leftmost on ties
fn best_fit(memory: &PhysicalMemory, required: usize) -> Option<BlockIndex> {
    memory
        .free_runs()
        .into_iter()
        .filter(|run| run.len >= required)
        // min_by_key keeps the first of equal keys
        .min_by_key(|run| run.len)
        .map(|run| run.start)
}

/// Largest qualifying free run, leftmost on ties
fn worst_fit(memory: &PhysicalMemory, required: usize) -> Option<BlockIndex> {
    memory
        .free_runs()
        .into_iter()
        .filter(|run| run.len >= required)
        .fold(None, |best: Option<(BlockIndex, usize)>, run| match best {
            Some((_, len)) if len >= run.len => best,
            _ => Some((run.start, run.len)),
        })
        .map(|(start, _)| start)
}
