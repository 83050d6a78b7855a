/*!
 * Contiguous Allocation Tests
 * Block partitioning, placement algorithms and deallocation
 */

use memsim::core::ProcessId;
use memsim::memory::{
    AllocationRequest, MemoryError, MemoryManager, MemoryMode, PlacementAlgorithm, ProcessLayout,
};
use memsim::{ConfigError, SimError, SimulatorConfig};
use pretty_assertions::assert_eq;

fn contiguous(total: usize, block: usize) -> MemoryManager {
    let mut manager = MemoryManager::new();
    manager
        .initialize(MemoryMode::Contiguous, total, block)
        .unwrap();
    manager
}

fn owners(manager: &MemoryManager) -> Vec<Option<String>> {
    manager
        .blocks()
        .iter()
        .map(|b| b.process_id.as_ref().map(|p| p.to_string()))
        .collect()
}

/// Free runs [1,4) len 3, [6,8) len 2 and [9,16) len 7 in 16 blocks of 64 KB
fn holey_manager(algorithm: PlacementAlgorithm) -> MemoryManager {
    let mut manager = contiguous(1024, 64);
    for size in [64, 192, 64, 64, 128, 64] {
        manager.allocate(AllocationRequest::new(size)).unwrap();
    }
    manager.deallocate(&ProcessId::from("P2")).unwrap();
    manager.deallocate(&ProcessId::from("P5")).unwrap();
    manager.set_algorithm(algorithm);
    manager
}

#[test]
fn test_initialize_partitions_blocks() {
    let mut manager = MemoryManager::new();
    let blocks = manager
        .initialize(MemoryMode::Contiguous, 1024, 64)
        .unwrap();

    assert_eq!(blocks.len(), 16);
    for (i, block) in blocks.iter().enumerate() {
        assert_eq!(block.id, i);
        assert_eq!(block.size, 64);
        assert_eq!(block.start_address, i * 64);
        assert!(!block.allocated);
        assert_eq!(block.process_id, None);
        assert_eq!(block.segment_id, None);
    }
}

#[test]
fn test_initialize_drops_remainder() {
    let manager = contiguous(1000, 64);

    assert_eq!(manager.blocks().len(), 15);
    assert_eq!(manager.total_memory(), 1000);
    assert_eq!(manager.stats().total_memory, 1000);
}

#[test]
fn test_initialize_rejects_invalid_unit_size() {
    let mut manager = contiguous(1024, 64);
    manager.allocate(AllocationRequest::new(100)).unwrap();

    let zero = manager.initialize(MemoryMode::Paging, 1024, 0).unwrap_err();
    assert!(matches!(zero, MemoryError::InvalidConfig(_)));

    let oversized = manager
        .initialize(MemoryMode::Paging, 64, 128)
        .unwrap_err();
    assert!(matches!(oversized, MemoryError::InvalidConfig(_)));

    // Previous state is untouched
    assert_eq!(manager.mode(), MemoryMode::Contiguous);
    assert_eq!(manager.processes().len(), 1);
    assert_eq!(manager.blocks().len(), 16);
}

#[test]
fn test_from_config_builds_initialized_engine() {
    let config = SimulatorConfig::default().with_algorithm(PlacementAlgorithm::BestFit);
    let manager = MemoryManager::from_config(&config).unwrap();

    assert_eq!(manager.mode(), MemoryMode::Contiguous);
    assert_eq!(manager.algorithm(), PlacementAlgorithm::BestFit);
    assert_eq!(manager.blocks().len(), 16);
}

#[test]
fn test_from_config_reports_config_errors() {
    let config = SimulatorConfig::default()
        .with_mode(MemoryMode::Paging)
        .with_page_size(0);

    let err = MemoryManager::from_config(&config).unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::ZeroUnitSize {
            mode: MemoryMode::Paging
        })
    ));

    let oversized = SimulatorConfig::default().with_total_memory(32);
    assert!(matches!(
        MemoryManager::from_config(&oversized),
        Err(SimError::Config(ConfigError::UnitExceedsTotal { .. }))
    ));
}

#[test]
fn test_first_fit_scenario() {
    let mut manager = contiguous(1024, 64);

    let process = manager.allocate(AllocationRequest::new(150)).unwrap();
    assert_eq!(process.id, ProcessId::from("P1"));
    assert_eq!(process.size, 150);
    assert_eq!(
        process.layout,
        ProcessLayout::Contiguous {
            start_block: 0,
            block_count: 3
        }
    );
    assert_eq!(manager.process_memory(&process.id), 192);

    let owned: Vec<usize> = manager
        .process_blocks(&process.id)
        .iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(owned, vec![0, 1, 2]);

    let err = manager.allocate(AllocationRequest::new(2000)).unwrap_err();
    assert_eq!(
        err,
        MemoryError::InsufficientSpace {
            requested: 2000,
            required_units: 32,
            free_units: 13,
            mode: MemoryMode::Contiguous,
        }
    );

    manager.deallocate(&ProcessId::from("P1")).unwrap();
    assert!(manager.processes().is_empty());
    assert!(manager.blocks().iter().all(|b| !b.allocated && b.process_id.is_none()));
}

#[test]
fn test_exact_fit_fills_memory() {
    let mut manager = contiguous(1024, 64);

    manager.allocate(AllocationRequest::new(1024)).unwrap();
    assert_eq!(manager.stats().free_blocks, 0);

    let err = manager.allocate(AllocationRequest::new(1)).unwrap_err();
    assert!(matches!(err, MemoryError::InsufficientSpace { .. }));
}

#[test]
fn test_zero_size_rejected() {
    let mut manager = contiguous(1024, 64);

    let err = manager.allocate(AllocationRequest::new(0)).unwrap_err();
    assert!(matches!(err, MemoryError::InvalidRequest(_)));
    assert!(manager.processes().is_empty());
}

#[test]
fn test_failed_allocation_leaves_memory_untouched() {
    let mut manager = contiguous(1024, 64);
    manager.allocate(AllocationRequest::new(500)).unwrap();
    let before = manager.blocks().to_vec();

    assert!(manager.allocate(AllocationRequest::new(600)).is_err());
    assert_eq!(manager.blocks(), before.as_slice());
    assert_eq!(manager.processes().len(), 1);
}

#[test]
fn test_process_ids_never_reused() {
    let mut manager = contiguous(1024, 64);

    let first = manager.allocate(AllocationRequest::new(64)).unwrap();
    manager.deallocate(&first.id).unwrap();
    let second = manager.allocate(AllocationRequest::new(64)).unwrap();

    assert_eq!(first.id, ProcessId::from("P1"));
    assert_eq!(second.id, ProcessId::from("P2"));
    // Same blocks, new owner
    assert_eq!(
        second.layout,
        ProcessLayout::Contiguous {
            start_block: 0,
            block_count: 1
        }
    );
}

#[test]
fn test_failed_allocation_does_not_consume_id() {
    let mut manager = contiguous(1024, 64);

    assert!(manager.allocate(AllocationRequest::new(4096)).is_err());
    let process = manager.allocate(AllocationRequest::new(64)).unwrap();
    assert_eq!(process.id, ProcessId::from("P1"));
}

#[test]
fn test_reinitialize_resets_ids_and_processes() {
    let mut manager = contiguous(1024, 64);
    manager.allocate(AllocationRequest::new(64)).unwrap();
    manager.allocate(AllocationRequest::new(64)).unwrap();

    manager
        .initialize(MemoryMode::Contiguous, 512, 32)
        .unwrap();
    assert!(manager.processes().is_empty());
    assert_eq!(manager.blocks().len(), 16);

    let process = manager.allocate(AllocationRequest::new(64)).unwrap();
    assert_eq!(process.id, ProcessId::from("P1"));
}

#[test]
fn test_first_fit_picks_leftmost_hole() {
    let mut manager = holey_manager(PlacementAlgorithm::FirstFit);

    let process = manager.allocate(AllocationRequest::new(100)).unwrap();
    assert_eq!(
        process.layout,
        ProcessLayout::Contiguous {
            start_block: 1,
            block_count: 2
        }
    );
}

#[test]
fn test_best_fit_picks_smallest_hole() {
    let mut manager = holey_manager(PlacementAlgorithm::BestFit);

    let process = manager.allocate(AllocationRequest::new(100)).unwrap();
    assert_eq!(
        process.layout,
        ProcessLayout::Contiguous {
            start_block: 6,
            block_count: 2
        }
    );
}

#[test]
fn test_worst_fit_picks_largest_hole() {
    let mut manager = holey_manager(PlacementAlgorithm::WorstFit);

    let process = manager.allocate(AllocationRequest::new(100)).unwrap();
    assert_eq!(
        process.layout,
        ProcessLayout::Contiguous {
            start_block: 9,
            block_count: 2
        }
    );
}

#[test]
fn test_best_fit_skips_holes_that_are_too_small() {
    let mut manager = holey_manager(PlacementAlgorithm::BestFit);

    // Only the 3- and 7-block holes fit
    let process = manager.allocate(AllocationRequest::new(150)).unwrap();
    assert_eq!(
        process.layout,
        ProcessLayout::Contiguous {
            start_block: 1,
            block_count: 3
        }
    );
}

#[test]
fn test_tie_break_is_leftmost() {
    // Two equal holes of two blocks: [0,2) and [3,5), plus [6,16)
    let mut manager = contiguous(1024, 64);
    for size in [128, 64, 128, 64] {
        manager.allocate(AllocationRequest::new(size)).unwrap();
    }
    manager.deallocate(&ProcessId::from("P1")).unwrap();
    manager.deallocate(&ProcessId::from("P3")).unwrap();
    manager.set_algorithm(PlacementAlgorithm::BestFit);

    let process = manager.allocate(AllocationRequest::new(128)).unwrap();
    assert_eq!(
        process.layout,
        ProcessLayout::Contiguous {
            start_block: 0,
            block_count: 2
        }
    );
}

#[test]
fn test_set_algorithm_keeps_memory() {
    let mut manager = contiguous(1024, 64);
    manager.allocate(AllocationRequest::new(200)).unwrap();

    manager.set_algorithm(PlacementAlgorithm::WorstFit);
    assert_eq!(manager.algorithm(), PlacementAlgorithm::WorstFit);
    assert_eq!(manager.processes().len(), 1);
    assert_eq!(
        owners(&manager)[..5],
        [
            Some("P1".to_string()),
            Some("P1".to_string()),
            Some("P1".to_string()),
            Some("P1".to_string()),
            None
        ]
    );
}

#[test]
fn test_deallocate_unknown_process() {
    let mut manager = contiguous(1024, 64);

    let err = manager.deallocate(&ProcessId::from("P9")).unwrap_err();
    assert_eq!(err, MemoryError::NotFound(ProcessId::from("P9")));
}

#[test]
fn test_deallocate_twice_fails() {
    let mut manager = contiguous(1024, 64);
    let process = manager.allocate(AllocationRequest::new(64)).unwrap();

    manager.deallocate(&process.id).unwrap();
    assert!(matches!(
        manager.deallocate(&process.id),
        Err(MemoryError::NotFound(_))
    ));
}

#[test]
fn test_segments_ignored_outside_segmentation() {
    let mut manager = contiguous(1024, 64);
    let request = AllocationRequest::new(128)
        .with_segments(vec![memsim::SegmentRequest::new("code", 64)]);

    let process = manager.allocate(request).unwrap();
    assert_eq!(process.layout.unit_count(), 2);
    assert!(manager.blocks().iter().all(|b| b.segment_id.is_none()));
}
