/*!
 * Property Tests
 * Placement ordering, round trips and rollback over random memory layouts
 */

use memsim::memory::{
    AllocationRequest, MemoryManager, MemoryMode, PlacementAlgorithm, ProcessLayout,
    SegmentRequest,
};
use proptest::prelude::*;

/// Random sequence of allocations, with some of the created processes released
fn build(mode: MemoryMode, sizes: &[usize], release: &[bool]) -> MemoryManager {
    let mut manager = MemoryManager::new();
    manager.initialize(mode, 1024, 32).unwrap();

    let created: Vec<_> = sizes
        .iter()
        .filter_map(|&size| manager.allocate(AllocationRequest::new(size)).ok())
        .collect();
    for (process, &released) in created.iter().zip(release) {
        if released {
            manager.deallocate(&process.id).unwrap();
        }
    }
    manager
}

fn start_block(layout: &ProcessLayout) -> usize {
    match layout {
        ProcessLayout::Contiguous { start_block, .. } => *start_block,
        other => panic!("expected contiguous layout, got {:?}", other),
    }
}

/// Free blocks from `start` up to the next allocated block
fn run_length(manager: &MemoryManager, start: usize) -> usize {
    manager.blocks()[start..]
        .iter()
        .take_while(|b| !b.allocated)
        .count()
}

fn layout_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<bool>)> {
    (
        prop::collection::vec(1usize..200, 1..24),
        prop::collection::vec(any::<bool>(), 24),
    )
}

proptest! {
    #[test]
    fn prop_partition_covers_address_space(total in 1usize..4096, unit in 1usize..256) {
        prop_assume!(unit <= total);
        let mut manager = MemoryManager::new();
        let blocks = manager.initialize(MemoryMode::Contiguous, total, unit).unwrap();

        prop_assert!(blocks.len() * unit <= total);
        for (i, block) in blocks.iter().enumerate() {
            prop_assert_eq!(block.start_address, i * unit);
        }
        prop_assert_eq!(manager.stats().fragmented_blocks, 0);
    }

    #[test]
    fn prop_placement_ordering((sizes, release) in layout_strategy(), request in 1usize..256) {
        let base = build(MemoryMode::Contiguous, &sizes, &release);

        let place = |algorithm: PlacementAlgorithm| {
            let mut manager = base.clone();
            manager.set_algorithm(algorithm);
            manager
                .allocate(AllocationRequest::new(request))
                .ok()
                .map(|p| start_block(&p.layout))
        };

        let first = place(PlacementAlgorithm::FirstFit);
        let best = place(PlacementAlgorithm::BestFit);
        let worst = place(PlacementAlgorithm::WorstFit);

        // All three succeed or fail together
        prop_assert_eq!(first.is_some(), best.is_some());
        prop_assert_eq!(first.is_some(), worst.is_some());

        if let (Some(first), Some(best), Some(worst)) = (first, best, worst) {
            prop_assert!(first <= best);
            prop_assert!(first <= worst);
            prop_assert!(run_length(&base, best) <= run_length(&base, worst));
        }
    }

    #[test]
    fn prop_allocate_then_deallocate_restores_blocks(
        (sizes, release) in layout_strategy(),
        request in 1usize..256,
        mode in prop_oneof![
            Just(MemoryMode::Contiguous),
            Just(MemoryMode::Paging),
            Just(MemoryMode::Segmentation),
        ],
    ) {
        let mut manager = build(mode, &sizes, &release);
        let before = manager.blocks().to_vec();
        let process_count = manager.processes().len();

        if let Ok(process) = manager.allocate(AllocationRequest::new(request)) {
            manager.deallocate(&process.id).unwrap();
        }

        prop_assert_eq!(manager.blocks(), before.as_slice());
        prop_assert_eq!(manager.processes().len(), process_count);
    }

    #[test]
    fn prop_segmentation_failure_leaks_nothing(
        (sizes, release) in layout_strategy(),
        segment_sizes in prop::collection::vec(1usize..400, 1..5),
    ) {
        let mut manager = build(MemoryMode::Segmentation, &sizes, &release);
        let before = manager.blocks().to_vec();
        let rows = manager.segment_table().map(<[_]>::len);

        let segments = segment_sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| SegmentRequest::new(format!("Seg{}", i + 1), size))
            .collect();
        let request = AllocationRequest::new(segment_sizes.iter().sum()).with_segments(segments);

        if manager.allocate(request).is_err() {
            prop_assert_eq!(manager.blocks(), before.as_slice());
            prop_assert_eq!(manager.segment_table().map(<[_]>::len), rows);
        }
    }

    #[test]
    fn prop_paging_uses_any_free_frames((sizes, release) in layout_strategy()) {
        let mut manager = build(MemoryMode::Paging, &sizes, &release);
        let free = manager.stats().free_blocks;
        prop_assume!(free > 0);

        let process = manager.allocate(AllocationRequest::new(free * 32)).unwrap();
        prop_assert_eq!(process.layout.unit_count(), free);
        prop_assert_eq!(manager.stats().free_blocks, 0);
        prop_assert_eq!(manager.stats().fragmented_blocks, 0);
    }

    #[test]
    fn prop_blocks_match_declared_layouts(
        (sizes, release) in layout_strategy(),
        mode in prop_oneof![
            Just(MemoryMode::Contiguous),
            Just(MemoryMode::Paging),
            Just(MemoryMode::Segmentation),
        ],
    ) {
        let manager = build(mode, &sizes, &release);

        for process in manager.processes() {
            prop_assert_eq!(
                manager.process_blocks(&process.id).len(),
                process.layout.unit_count()
            );
        }
        let owned: usize = manager.processes().iter().map(|p| p.layout.unit_count()).sum();
        prop_assert_eq!(owned, manager.stats().allocated_blocks);
    }
}
