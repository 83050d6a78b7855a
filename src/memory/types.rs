/*!
 * Memory Types
 * Common types for memory management
 */

use crate::core::limits::{
    DEFAULT_SEGMENT_NAME, PRESSURE_CRITICAL_PERCENT, PRESSURE_HIGH_PERCENT,
    PRESSURE_MEDIUM_PERCENT,
};
use crate::core::types::{Address, BlockIndex, Kilobytes, ProcessId};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("No space for {requested} KB: {required_units} {mode} units needed, {free_units} free")]
    #[diagnostic(
        code(memory::insufficient_space),
        help("Deallocate a process or choose a different placement algorithm.")
    )]
    InsufficientSpace {
        requested: Kilobytes,
        required_units: usize,
        free_units: usize,
        mode: MemoryMode,
    },

    #[error("Process {0} not found")]
    #[diagnostic(
        code(memory::not_found),
        help("The process may have been deallocated or memory re-initialized.")
    )]
    NotFound(ProcessId),

    #[error("Invalid memory configuration: {0}")]
    #[diagnostic(
        code(memory::invalid_config),
        help("Unit size must be positive and no larger than total memory.")
    )]
    InvalidConfig(String),

    #[error("Invalid allocation request: {0}")]
    #[diagnostic(code(memory::invalid_request), help("Request sizes must be positive."))]
    InvalidRequest(String),

    #[error("Offset {offset} KB is outside {process_id} (limit {limit} KB)")]
    #[diagnostic(code(memory::address_out_of_range))]
    AddressOutOfRange {
        process_id: ProcessId,
        offset: Kilobytes,
        limit: Kilobytes,
    },

    #[error("Segment '{segment}' not found in {process_id}")]
    #[diagnostic(code(memory::segment_not_found))]
    SegmentNotFound {
        process_id: ProcessId,
        segment: String,
    },

    #[error("Process {process_id} uses {actual} memory, not supported by {operation}")]
    #[diagnostic(
        code(memory::mode_mismatch),
        help("Use translate_segment for segmented processes and translate otherwise.")
    )]
    ModeMismatch {
        process_id: ProcessId,
        actual: MemoryMode,
        operation: String,
    },
}

/// Memory organisation the engine simulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemoryMode {
    #[default]
    Contiguous,
    Paging,
    Segmentation,
}

impl fmt::Display for MemoryMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryMode::Contiguous => write!(f, "contiguous"),
            MemoryMode::Paging => write!(f, "paging"),
            MemoryMode::Segmentation => write!(f, "segmentation"),
        }
    }
}

impl std::str::FromStr for MemoryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "contiguous" => Ok(MemoryMode::Contiguous),
            "paging" => Ok(MemoryMode::Paging),
            "segmentation" => Ok(MemoryMode::Segmentation),
            other => Err(format!("unknown memory mode '{}'", other)),
        }
    }
}

/// Placement policy for contiguous runs of blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlacementAlgorithm {
    /// Leftmost run that fits
    #[default]
    FirstFit,
    /// Smallest free run that fits
    BestFit,
    /// Largest free run
    WorstFit,
}

impl fmt::Display for PlacementAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlacementAlgorithm::FirstFit => write!(f, "firstFit"),
            PlacementAlgorithm::BestFit => write!(f, "bestFit"),
            PlacementAlgorithm::WorstFit => write!(f, "worstFit"),
        }
    }
}

impl std::str::FromStr for PlacementAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "firstfit" | "first" => Ok(PlacementAlgorithm::FirstFit),
            "bestfit" | "best" => Ok(PlacementAlgorithm::BestFit),
            "worstfit" | "worst" => Ok(PlacementAlgorithm::WorstFit),
            other => Err(format!("unknown placement algorithm '{}'", other)),
        }
    }
}

/// Physical memory block (a frame in paging mode)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockIndex,
    pub size: Kilobytes,
    pub start_address: Address,
    pub allocated: bool,
    pub process_id: Option<ProcessId>,
    /// Only set in segmentation mode
    pub segment_id: Option<String>,
}

impl Block {
    pub fn new(id: BlockIndex, size: Kilobytes) -> Self {
        Self {
            id,
            size,
            start_address: id * size,
            allocated: false,
            process_id: None,
            segment_id: None,
        }
    }

    pub fn assign(&mut self, owner: &ProcessId, segment_id: Option<&str>) {
        self.allocated = true;
        self.process_id = Some(owner.clone());
        self.segment_id = segment_id.map(str::to_string);
    }

    pub fn free(&mut self) {
        self.allocated = false;
        self.process_id = None;
        self.segment_id = None;
    }

    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    pub fn is_owned_by(&self, owner: &ProcessId) -> bool {
        self.process_id.as_ref() == Some(owner)
    }
}

/// One logical page to physical frame mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTableEntry {
    pub process_id: ProcessId,
    pub logical_page: usize,
    pub physical_frame: BlockIndex,
    pub frame_address: Address,
}

/// Independently placed, named region of a segmented process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub name: String,
    pub size: Kilobytes,
    pub start_block: BlockIndex,
    pub block_count: usize,
    pub process_id: ProcessId,
}

impl Segment {
    pub fn segment_id(process_id: &ProcessId, name: &str) -> String {
        format!("{}-{}", process_id, name)
    }
}

/// Named segment size requested by a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRequest {
    pub name: String,
    pub size: Kilobytes,
}

impl SegmentRequest {
    pub fn new(name: impl Into<String>, size: Kilobytes) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Memory allocation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub size: Kilobytes,
    /// Segment layout, only honoured in segmentation mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<SegmentRequest>>,
}

impl AllocationRequest {
    pub fn new(size: Kilobytes) -> Self {
        Self {
            size,
            segments: None,
        }
    }

    pub fn with_segments(mut self, segments: Vec<SegmentRequest>) -> Self {
        self.segments = Some(segments);
        self
    }

    /// Segments to place, falling back to a single segment covering the whole size
    ///
    /// Only an absent list falls back; an explicit empty list is kept and
    /// rejected by the allocator.
    pub fn segment_plan(&self) -> Vec<SegmentRequest> {
        match &self.segments {
            Some(segments) => segments.clone(),
            None => vec![SegmentRequest::new(DEFAULT_SEGMENT_NAME, self.size)],
        }
    }
}

impl From<Kilobytes> for AllocationRequest {
    fn from(size: Kilobytes) -> Self {
        Self::new(size)
    }
}

/// Mode-specific placement of a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ProcessLayout {
    #[serde(rename_all = "camelCase")]
    Contiguous {
        start_block: BlockIndex,
        block_count: usize,
    },
    #[serde(rename_all = "camelCase")]
    Paging {
        page_table: Vec<PageTableEntry>,
        page_count: usize,
    },
    #[serde(rename_all = "camelCase")]
    Segmentation {
        segments: Vec<Segment>,
        segment_count: usize,
    },
}

impl ProcessLayout {
    pub fn mode(&self) -> MemoryMode {
        match self {
            ProcessLayout::Contiguous { .. } => MemoryMode::Contiguous,
            ProcessLayout::Paging { .. } => MemoryMode::Paging,
            ProcessLayout::Segmentation { .. } => MemoryMode::Segmentation,
        }
    }

    /// Number of blocks/frames the layout occupies
    pub fn unit_count(&self) -> usize {
        match self {
            ProcessLayout::Contiguous { block_count, .. } => *block_count,
            ProcessLayout::Paging { page_count, .. } => *page_count,
            ProcessLayout::Segmentation { segments, .. } => {
                segments.iter().map(|s| s.block_count).sum()
            }
        }
    }
}

/// Successfully allocated process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: ProcessId,
    pub size: Kilobytes,
    pub layout: ProcessLayout,
}

impl Process {
    pub fn mode(&self) -> MemoryMode {
        self.layout.mode()
    }

    pub fn page_table(&self) -> Option<&[PageTableEntry]> {
        match &self.layout {
            ProcessLayout::Paging { page_table, .. } => Some(page_table),
            _ => None,
        }
    }

    pub fn segments(&self) -> Option<&[Segment]> {
        match &self.layout {
            ProcessLayout::Segmentation { segments, .. } => Some(segments),
            _ => None,
        }
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub utilization_rate: f64,
    pub used_memory: Kilobytes,
    pub total_memory: Kilobytes,
    pub active_processes: usize,
    pub fragmented_blocks: usize,
    pub memory_type: MemoryMode,
    pub unit_size: Kilobytes,
    pub total_blocks: usize,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<Kilobytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_count: Option<usize>,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_utilization(self.utilization_rate)
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_utilization(percent: f64) -> Self {
        if percent >= PRESSURE_CRITICAL_PERCENT {
            MemoryPressure::Critical
        } else if percent >= PRESSURE_HIGH_PERCENT {
            MemoryPressure::High
        } else if percent >= PRESSURE_MEDIUM_PERCENT {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Allocation activity since the last initialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub allocations: usize,
    pub failed_allocations: usize,
    pub deallocations: usize,
    pub peak_allocated_blocks: usize,
}

/// Complete engine state for a presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySnapshot {
    pub mode: MemoryMode,
    pub algorithm: PlacementAlgorithm,
    pub unit_size: Kilobytes,
    pub blocks: Vec<Block>,
    pub processes: Vec<Process>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_table_entries: Option<Vec<PageTableEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_table: Option<Vec<Segment>>,
    pub stats: MemoryStats,
    pub session: SessionStats,
}
