//! Simulation harness.
//!
//! Reads trace records and drives them through the cache model.

/// Replay loop and per-event outcomes.
pub mod simulator;

/// Trace file parsing.
pub mod trace;

pub use simulator::{Simulator, Step};
pub use trace::{parse_record, TraceReader};
