//! Memory Access Types.
//!
//! This module defines the classification of trace records. Only data
//! accesses reach the cache model; instruction fetches are carried through
//! the trace so the reader can skip them without treating them as malformed.

use std::fmt;

/// Type of memory access recorded in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Data load (`L`/`l`).
    Load,

    /// Data store (`S`/`s`).
    Store,

    /// Read-modify-write (`M`/`m`).
    ///
    /// Replayed as a load followed by a store to the same address.
    Modify,

    /// Instruction fetch (`I`, uppercase only).
    ///
    /// Ignored by the simulator: it neither touches the cache nor
    /// advances the logical clock.
    Instruction,
}

impl AccessKind {
    /// Maps a trace operation character to an access kind.
    ///
    /// The instruction marker is matched exactly. Data operations are
    /// matched case-insensitively.
    pub fn from_op(op: char) -> Option<Self> {
        match op {
            'I' => Some(AccessKind::Instruction),
            'L' | 'l' => Some(AccessKind::Load),
            'S' | 's' => Some(AccessKind::Store),
            'M' | 'm' => Some(AccessKind::Modify),
            _ => None,
        }
    }

    /// Returns the canonical operation character.
    pub fn op(self) -> char {
        match self {
            AccessKind::Load => 'L',
            AccessKind::Store => 'S',
            AccessKind::Modify => 'M',
            AccessKind::Instruction => 'I',
        }
    }

    /// Returns `true` for kinds that access the data cache.
    pub fn is_data(self) -> bool {
        !matches!(self, AccessKind::Instruction)
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op())
    }
}

/// A single parsed trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    pub kind: AccessKind,
    pub address: u64,
    /// Access width in bytes. Carried for reporting only.
    pub size: u32,
}

impl TraceEvent {
    /// Creates a new trace event.
    pub fn new(kind: AccessKind, address: u64, size: u32) -> Self {
        Self {
            kind,
            address,
            size,
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.kind, self.address, self.size)
    }
}
