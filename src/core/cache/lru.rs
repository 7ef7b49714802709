//! Least Recently Used (LRU) Victim Selection.
//!
//! Every valid line carries the logical-clock value of its last access.
//! The victim is the valid line with the smallest stamp. Lines are scanned
//! in slot order and the candidate only changes on a strictly smaller
//! stamp, so the earliest slot wins a tie.
//!
//! # Performance
//!
//! - **Time Complexity:** O(W) per lookup where W is the associativity,
//!   folded into the same scan that checks for a hit.
//! - **Space Complexity:** one `u64` stamp per line.

use super::line::CacheLine;

/// Running LRU candidate for a single slot-order scan of one set.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruCandidate {
    best: Option<(usize, u64)>,
}

impl LruCandidate {
    /// Creates an empty candidate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Considers a valid line at slot `way` last used at `last_used`.
    pub fn observe(&mut self, way: usize, last_used: u64) {
        match self.best {
            Some((_, stamp)) if last_used >= stamp => {}
            _ => self.best = Some((way, last_used)),
        }
    }

    /// Returns the slot to evict, if any valid line was observed.
    pub fn victim(&self) -> Option<usize> {
        self.best.map(|(way, _)| way)
    }
}

/// Picks the LRU victim among the valid lines of `set`.
///
/// Returns `None` if the set has no valid lines.
pub fn select_victim(set: &[CacheLine]) -> Option<usize> {
    let mut candidate = LruCandidate::new();
    for (way, line) in set.iter().enumerate().filter(|(_, l)| l.valid) {
        candidate.observe(way, line.last_used);
    }
    candidate.victim()
}
