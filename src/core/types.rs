/*!
 * Core Types
 * Common types used across the simulator
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Memory quantity in KB (the simulator's only unit)
pub type Kilobytes = usize;

/// Physical address in KB from the start of memory
pub type Address = usize;

/// Ordinal position of a block (or frame) in physical memory
pub type BlockIndex = usize;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimError>;

/// Process identifier, rendered as `P{n}`
///
/// Minted sequentially by the engine and never reused within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(String);

impl ProcessId {
    /// Build the id for the `n`-th process of a session
    pub fn from_sequence(n: u64) -> Self {
        Self(format!("P{}", n))
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProcessId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProcessId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ProcessId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Number of `unit`-sized units needed to hold `size` (ceiling division)
#[inline]
pub fn units_for(size: Kilobytes, unit: Kilobytes) -> usize {
    size.div_ceil(unit)
}
