//! Configuration system for the cache simulator.
//!
//! Cache geometry and run options can come from a TOML file, from
//! command-line flags, or from both. Flags take precedence. The merged
//! result is validated before any cache state is allocated.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::addr::AddressDecoder;
use crate::common::error::ConfigError;

/// Geometry of a set-associative cache.
///
/// `s` set-index bits give `S = 2^s` sets, `b` block-offset bits give
/// `B = 2^b`-byte blocks, and every set holds `E` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Number of set-index bits (`s`).
    pub set_bits: u32,

    /// Number of block-offset bits (`b`).
    pub block_bits: u32,

    /// Lines per set (`E`), i.e. the associativity.
    pub lines_per_set: usize,
}

impl CacheConfig {
    /// Creates a configuration from `s`, `b`, and `E`.
    pub fn new(set_bits: u32, block_bits: u32, lines_per_set: usize) -> Self {
        Self {
            set_bits,
            block_bits,
            lines_per_set,
        }
    }

    /// Checks that the geometry describes a buildable cache.
    ///
    /// # Errors
    ///
    /// * `ConfigError::ZeroLines` if `E` is zero.
    /// * `ConfigError::AddressWidth` if `s + b` exceeds 64.
    /// * `ConfigError::TooLarge` if `S * E` does not fit in memory indices.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lines_per_set == 0 {
            return Err(ConfigError::ZeroLines);
        }
        AddressDecoder::new(self.set_bits, self.block_bits)?;
        self.total_lines().map(|_| ())
    }

    /// Number of sets, `S = 2^s`.
    ///
    /// Returns `None` when `2^s` is not representable as a `usize`.
    pub fn num_sets(&self) -> Option<usize> {
        1usize.checked_shl(self.set_bits)
    }

    /// Block size in bytes, `B = 2^b`.
    ///
    /// Returns `None` when `2^b` is not representable as a `u64`.
    pub fn block_bytes(&self) -> Option<u64> {
        1u64.checked_shl(self.block_bits)
    }

    /// Total number of lines, `S * E`.
    pub fn total_lines(&self) -> Result<usize, ConfigError> {
        self.num_sets()
            .and_then(|sets| sets.checked_mul(self.lines_per_set))
            .ok_or(ConfigError::TooLarge {
                set_bits: self.set_bits,
                lines_per_set: self.lines_per_set,
            })
    }

    /// Data capacity in bytes, `S * E * B`, if representable.
    pub fn capacity_bytes(&self) -> Option<u64> {
        let lines = u64::try_from(self.total_lines().ok()?).ok()?;
        lines.checked_mul(self.block_bytes()?)
    }
}

/// Output format for the final statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

/// Top-level configuration file layout.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub cache: PartialCacheConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_verbose")]
    pub verbose: bool,

    #[serde(default)]
    pub output: OutputFormat,

    #[serde(default)]
    pub trace: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: default_verbose(),
            output: OutputFormat::default(),
            trace: None,
        }
    }
}

/// Cache geometry as written in a file, where any field may be absent.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PartialCacheConfig {
    pub set_bits: Option<u32>,
    pub block_bits: Option<u32>,
    pub lines_per_set: Option<usize>,
}

impl PartialCacheConfig {
    /// Fills absent fields from `fallback`.
    pub fn or(self, fallback: PartialCacheConfig) -> PartialCacheConfig {
        PartialCacheConfig {
            set_bits: self.set_bits.or(fallback.set_bits),
            block_bits: self.block_bits.or(fallback.block_bits),
            lines_per_set: self.lines_per_set.or(fallback.lines_per_set),
        }
    }

    /// Resolves into a validated `CacheConfig`.
    ///
    /// # Errors
    ///
    /// `ConfigError::Missing` names the first absent parameter; otherwise
    /// any error from `CacheConfig::validate`.
    pub fn resolve(self) -> Result<CacheConfig, ConfigError> {
        let config = CacheConfig {
            set_bits: self.set_bits.ok_or(ConfigError::Missing("set bits (-s)"))?,
            block_bits: self.block_bits.ok_or(ConfigError::Missing("block bits (-b)"))?,
            lines_per_set: self
                .lines_per_set
                .ok_or(ConfigError::Missing("lines per set (-E)"))?,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Loads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

fn default_verbose() -> bool {
    false
}
