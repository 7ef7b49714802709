//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the fundamental types shared by the cache model,
//! the trace reader, and the simulation driver: address decomposition,
//! memory access classification, and error handling.

/// Address decomposition into tag, set index, and block offset.
pub mod addr;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration and trace parsing.
pub mod error;

pub use addr::{decode, AddressDecoder, DecodedAddr, ADDRESS_BITS};
pub use data::{AccessKind, TraceEvent};
pub use error::{ConfigError, TraceError};
