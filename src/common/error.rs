//! Error Types.
//!
//! Two classes of failure exist. Configuration errors are fatal and occur
//! before any cache state is built. Trace errors are never fatal: they end
//! the event stream and the statistics gathered so far are kept.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration failure, raised before simulation starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required parameter was supplied neither on the command line nor in
    /// the configuration file.
    #[error("missing required parameter: {0}")]
    Missing(&'static str),

    /// The associativity `E` must be at least one line per set.
    #[error("lines per set (E) must be positive")]
    ZeroLines,

    /// Set-index and block-offset bits do not fit in a 64-bit address.
    #[error("set bits ({set_bits}) + block bits ({block_bits}) exceed the 64-bit address width")]
    AddressWidth { set_bits: u32, block_bits: u32 },

    /// The requested geometry cannot be allocated.
    #[error("cache with 2^{set_bits} sets of {lines_per_set} lines cannot be allocated")]
    TooLarge { set_bits: u32, lines_per_set: usize },

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The trace file could not be opened.
    #[error("failed to open trace {path}: {source}")]
    TraceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reason a trace stopped early. Ends the event stream.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A record did not have the shape `op address size`.
    #[error("malformed record at line {line} ({reason}): {text:?}")]
    Malformed {
        line: usize,
        text: String,
        reason: &'static str,
    },

    /// The underlying reader failed.
    #[error("read error at line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
}

impl TraceError {
    /// One-based line number where the stream ended.
    pub fn line(&self) -> usize {
        match self {
            TraceError::Malformed { line, .. } | TraceError::Io { line, .. } => *line,
        }
    }
}
