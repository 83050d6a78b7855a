/*!
 * Simulator Configuration
 * Memory mode, placement algorithm and sizing knobs
 */

use super::json::{self, JsonError};
use super::limits::{DEFAULT_BLOCK_SIZE, DEFAULT_PAGE_SIZE, DEFAULT_TOTAL_MEMORY};
use super::types::Kilobytes;
use crate::memory::{MemoryMode, PlacementAlgorithm};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Unit size must be greater than zero ({mode} mode)")]
    #[diagnostic(code(config::zero_unit))]
    ZeroUnitSize { mode: MemoryMode },

    #[error("Total memory must be at least the unit size: {total_memory} KB < {unit_size} KB")]
    #[diagnostic(
        code(config::unit_exceeds_total),
        help("Lower the block/page size or raise MEMSIM_TOTAL_MEMORY.")
    )]
    UnitExceedsTotal {
        total_memory: Kilobytes,
        unit_size: Kilobytes,
    },

    #[error("Invalid value for {key}: {message}")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue { key: String, message: String },

    #[error("Invalid configuration document: {0}")]
    #[diagnostic(code(config::invalid_document))]
    Document(#[from] JsonError),
}

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulatorConfig {
    pub mode: MemoryMode,
    /// Ignored in paging mode
    pub algorithm: PlacementAlgorithm,
    pub total_memory: Kilobytes,
    pub block_size: Kilobytes,
    pub page_size: Kilobytes,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            mode: MemoryMode::Contiguous,
            algorithm: PlacementAlgorithm::FirstFit,
            total_memory: DEFAULT_TOTAL_MEMORY,
            block_size: DEFAULT_BLOCK_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SimulatorConfig {
    pub fn with_mode(mut self, mode: MemoryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_algorithm(mut self, algorithm: PlacementAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_total_memory(mut self, total_memory: Kilobytes) -> Self {
        self.total_memory = total_memory;
        self
    }

    pub fn with_block_size(mut self, block_size: Kilobytes) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_page_size(mut self, page_size: Kilobytes) -> Self {
        self.page_size = page_size;
        self
    }

    /// Partition unit for the configured mode
    pub fn unit_size(&self) -> Kilobytes {
        match self.mode {
            MemoryMode::Paging => self.page_size,
            MemoryMode::Contiguous | MemoryMode::Segmentation => self.block_size,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_size = self.unit_size();
        if unit_size == 0 {
            return Err(ConfigError::ZeroUnitSize { mode: self.mode });
        }
        if self.total_memory < unit_size {
            return Err(ConfigError::UnitExceedsTotal {
                total_memory: self.total_memory,
                unit_size,
            });
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `MEMSIM_*` environment variables
    ///
    /// Environment variables:
    /// - MEMSIM_MODE: contiguous | paging | segmentation
    /// - MEMSIM_ALGORITHM: firstFit | bestFit | worstFit
    /// - MEMSIM_TOTAL_MEMORY, MEMSIM_BLOCK_SIZE, MEMSIM_PAGE_SIZE: sizes in KB
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("MEMSIM_MODE") {
            config.mode = value
                .parse::<MemoryMode>()
                .map_err(|message| invalid("MEMSIM_MODE", message))?;
        }
        if let Some(value) = lookup("MEMSIM_ALGORITHM") {
            config.algorithm = value
                .parse::<PlacementAlgorithm>()
                .map_err(|message| invalid("MEMSIM_ALGORITHM", message))?;
        }
        if let Some(value) = lookup("MEMSIM_TOTAL_MEMORY") {
            config.total_memory = parse_size("MEMSIM_TOTAL_MEMORY", &value)?;
        }
        if let Some(value) = lookup("MEMSIM_BLOCK_SIZE") {
            config.block_size = parse_size("MEMSIM_BLOCK_SIZE", &value)?;
        }
        if let Some(value) = lookup("MEMSIM_PAGE_SIZE") {
            config.page_size = parse_size("MEMSIM_PAGE_SIZE", &value)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn invalid(key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    }
}

fn parse_size(key: &str, value: &str) -> Result<Kilobytes, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid(key, e.to_string()))
}
