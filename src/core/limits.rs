/*!
 * Simulator Limits and Constants
 *
 * Centralized location for defaults, thresholds, and workload bounds.
 * Grouped by domain.
 */

// =============================================================================
// MEMORY DEFAULTS
// =============================================================================

/// Default total simulated memory (1MB, expressed in KB)
pub const DEFAULT_TOTAL_MEMORY: usize = 1024;

/// Default block size for contiguous and segmented memory (KB)
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// Default page/frame size for paged memory (KB)
pub const DEFAULT_PAGE_SIZE: usize = 16;

/// Name of the synthetic segment used when a segmented request carries none
pub const DEFAULT_SEGMENT_NAME: &str = "default";

// =============================================================================
// MEMORY PRESSURE (percentage of allocated blocks)
// =============================================================================

/// Medium pressure threshold
pub const PRESSURE_MEDIUM_PERCENT: f64 = 60.0;

/// High pressure threshold, logged as a warning
pub const PRESSURE_HIGH_PERCENT: f64 = 80.0;

/// Critical pressure threshold
pub const PRESSURE_CRITICAL_PERCENT: f64 = 95.0;

// =============================================================================
// PRESENTATION
// =============================================================================

/// Default page length when a front-end paginates block/process lists
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

// =============================================================================
// RANDOM WORKLOAD
// =============================================================================

/// Fewest requests generated per random batch
pub const WORKLOAD_MIN_REQUESTS: usize = 2;

/// Most requests generated per random batch
pub const WORKLOAD_MAX_REQUESTS: usize = 4;

/// Smallest random request (KB)
pub const WORKLOAD_MIN_SIZE: usize = 32;

/// Largest random request (KB, inclusive)
pub const WORKLOAD_MAX_SIZE: usize = 159;

/// Most segments a random segmented request is split into
pub const WORKLOAD_MAX_SEGMENTS: usize = 3;

// =============================================================================
// TRACING
// =============================================================================

/// Operations slower than this are reported as slow (milliseconds)
pub const SLOW_OPERATION_MS: u128 = 100;
