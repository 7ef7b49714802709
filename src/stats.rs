//! Simulation statistics collection and reporting.
//!
//! Tracks hit, miss, and eviction counts per access kind. Counters only
//! ever increase, and the load/store totals are derived on demand so they
//! hold after every processed event.

use std::fmt::Write as _;

use serde::Serialize;

use crate::common::data::AccessKind;
use crate::core::cache::AccessResult;

/// Simulation statistics structure tracking cache outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimStats {
    pub load_hits: u64,
    pub store_hits: u64,
    pub load_misses: u64,
    pub store_misses: u64,
    pub evictions: u64,
}

impl SimStats {
    /// Records the outcome of one access of `kind`.
    ///
    /// `Modify` is not a single access; the simulator splits it into a load
    /// and a store before recording. `Instruction` is never recorded.
    pub fn record(&mut self, kind: AccessKind, result: AccessResult) {
        match (kind, result.hit) {
            (AccessKind::Load, true) => self.load_hits += 1,
            (AccessKind::Load, false) => self.load_misses += 1,
            (AccessKind::Store, true) => self.store_hits += 1,
            (AccessKind::Store, false) => self.store_misses += 1,
            (AccessKind::Modify | AccessKind::Instruction, _) => {
                tracing::warn!(%kind, "ignoring outcome recorded for non-access kind");
                return;
            }
        }
        if result.evicted {
            self.evictions += 1;
        }
    }

    /// Total loads, `load_hits + load_misses`.
    pub fn total_loads(&self) -> u64 {
        self.load_hits + self.load_misses
    }

    /// Total stores, `store_hits + store_misses`.
    pub fn total_stores(&self) -> u64 {
        self.store_hits + self.store_misses
    }

    pub fn hits(&self) -> u64 {
        self.load_hits + self.store_hits
    }

    pub fn misses(&self) -> u64 {
        self.load_misses + self.store_misses
    }

    /// Fraction of accesses that missed, in `[0, 1]`. Zero when idle.
    pub fn miss_rate(&self) -> f64 {
        let total = self.hits() + self.misses();
        if total == 0 {
            0.0
        } else {
            self.misses() as f64 / total as f64
        }
    }

    /// Renders the classic load/store summary.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "total load: {}\ttotal store: {} \nload hits: {}\tstore hits: {} \nload misses: {}\tstore misses: {} \n",
            self.total_loads(),
            self.total_stores(),
            self.load_hits,
            self.store_hits,
            self.load_misses,
            self.store_misses
        );
        out
    }

    /// Serializes the counters and derived totals as a JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&serde_json::json!({
            "load_hits": self.load_hits,
            "store_hits": self.store_hits,
            "load_misses": self.load_misses,
            "store_misses": self.store_misses,
            "evictions": self.evictions,
            "total_loads": self.total_loads(),
            "total_stores": self.total_stores(),
            "miss_rate": self.miss_rate(),
        }))
    }

    /// Prints the summary followed by eviction and miss-rate lines.
    pub fn print(&self) {
        print!("{}", self.summary());
        println!("evictions: {}", self.evictions);
        println!("miss rate: {:.2}%", self.miss_rate() * 100.0);
    }
}
