//! Set-Associative Cache Simulator Library.
//!
//! Replays a memory-access trace against a modelled cache and reports hit,
//! miss, and eviction counts.
//!
//! # Architecture
//!
//! * **Decoder**: splits a 64-bit address into tag, set index, and block offset.
//! * **Cache**: `2^s` sets of `E` lines with LRU replacement driven by a logical clock.
//! * **Simulator**: feeds trace events through the cache and accumulates statistics.
//!
//! # Modules
//!
//! * `common`: Shared types, address decoding, and error handling.
//! * `config`: Configuration loading and validation.
//! * `core`: Cache state and the access/eviction algorithm.
//! * `sim`: Trace reading and the replay loop.
//! * `stats`: Statistics collection and reporting.

/// Shared types, address decoding, and error handling.
///
/// Provides the access classification, the address decoder, and the error
/// types used throughout the simulator.
pub mod common;

/// Configuration system for cache geometry and run options.
///
/// Loads TOML configuration files and merges them with command-line values.
pub mod config;

/// Cache model implementation.
///
/// Owns the line array and logical clock, and resolves each access to a
/// hit, a fill, or an eviction.
pub mod core;

/// Simulation harness and trace reader.
pub mod sim;

/// Statistics collection and reporting.
pub mod stats;
