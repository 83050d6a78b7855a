/*!
 * Random Workload
 * Batches of randomly sized processes for exercising an allocator
 */

use super::traits::Allocator;
use super::types::{AllocationRequest, MemoryMode, Process, SegmentRequest};
use crate::core::limits::{
    WORKLOAD_MAX_REQUESTS, WORKLOAD_MAX_SEGMENTS, WORKLOAD_MAX_SIZE, WORKLOAD_MIN_REQUESTS,
    WORKLOAD_MIN_SIZE,
};
use crate::core::types::Kilobytes;
use rand::Rng;
use tracing::{debug, info};

/// Generate 2-4 requests of 32-159 KB
///
/// In segmentation mode each request is split into 1-3 segments named
/// `Seg1..SegN` whose sizes add up to the request size.
pub fn random_requests<R: Rng>(rng: &mut R, mode: MemoryMode) -> Vec<AllocationRequest> {
    let count = rng.gen_range(WORKLOAD_MIN_REQUESTS..=WORKLOAD_MAX_REQUESTS);

    (0..count)
        .map(|_| {
            let size = rng.gen_range(WORKLOAD_MIN_SIZE..=WORKLOAD_MAX_SIZE);
            let request = AllocationRequest::new(size);
            if mode == MemoryMode::Segmentation {
                request.with_segments(split_into_segments(rng, size))
            } else {
                request
            }
        })
        .collect()
}

/// Split `size` into 1-3 positive segment sizes
fn split_into_segments<R: Rng>(rng: &mut R, size: Kilobytes) -> Vec<SegmentRequest> {
    let count = rng.gen_range(1..=WORKLOAD_MAX_SEGMENTS).min(size.max(1));
    let mut remaining = size;
    let mut segments = Vec::with_capacity(count);

    for index in 0..count {
        let left_after = count - index - 1;
        let segment_size = if left_after == 0 {
            remaining
        } else {
            // Between half and one and a half of an even share, leaving 1 KB per later segment
            let share = remaining / (left_after + 1);
            let low = (share / 2).max(1);
            let high = (share + share / 2).clamp(low, remaining - left_after);
            rng.gen_range(low..=high)
        };
        segments.push(SegmentRequest::new(format!("Seg{}", index + 1), segment_size));
        remaining -= segment_size;
    }

    segments
}

/// Apply `requests` in order, stopping at the first failure
///
/// Returns the processes created before the failure.
pub fn run_workload<A: Allocator + ?Sized>(
    allocator: &mut A,
    requests: Vec<AllocationRequest>,
) -> Vec<Process> {
    let total = requests.len();
    let mut created = Vec::with_capacity(total);

    for request in requests {
        match allocator.allocate(request) {
            Ok(process) => created.push(process),
            Err(e) => {
                debug!(error = %e, "Workload stopped at first failed request");
                break;
            }
        }
    }

    info!(
        requested = total,
        allocated = created.len(),
        mode = %allocator.mode(),
        "Workload applied"
    );
    created
}

/// Generate and apply one random batch against `allocator`
pub fn run_random_workload<A, R>(allocator: &mut A, rng: &mut R) -> Vec<Process>
where
    A: Allocator + ?Sized,
    R: Rng,
{
    let requests = random_requests(rng, allocator.mode());
    run_workload(allocator, requests)
}
