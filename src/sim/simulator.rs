//! Trace Replay Driver.
//!
//! Feeds trace events through the cache one at a time and folds each
//! outcome into the statistics. Each event is fully resolved before the
//! next is read, so a given configuration and trace always produce the
//! same outcomes.

use std::fmt;

use crate::common::data::{AccessKind, TraceEvent};
use crate::common::error::ConfigError;
use crate::config::CacheConfig;
use crate::core::cache::{AccessResult, Cache};
use crate::stats::SimStats;

/// What one trace event did to the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Instruction fetch. Nothing changed.
    Ignored,

    /// A single load or store.
    Access(AccessResult),

    /// A read-modify-write: a load followed by a store to the same address.
    Modify {
        load: AccessResult,
        store: AccessResult,
    },
}

impl fmt::Display for Step {
    /// Formats the outcome words, e.g. `miss eviction hit`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn words(f: &mut fmt::Formatter<'_>, r: &AccessResult) -> fmt::Result {
            f.write_str(if r.hit { "hit" } else { "miss" })?;
            if r.evicted {
                f.write_str(" eviction")?;
            }
            Ok(())
        }

        match self {
            Step::Ignored => Ok(()),
            Step::Access(result) => words(f, result),
            Step::Modify { load, store } => {
                words(f, load)?;
                f.write_str(" ")?;
                words(f, store)
            }
        }
    }
}

/// Replays trace events against a single cache.
pub struct Simulator {
    cache: Cache,
    stats: SimStats,
}

impl Simulator {
    /// Builds an empty cache for `config`.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            cache: Cache::new(config)?,
            stats: SimStats::default(),
        })
    }

    /// Processes a single trace event.
    pub fn step(&mut self, event: &TraceEvent) -> Step {
        let step = match event.kind {
            AccessKind::Instruction => Step::Ignored,
            AccessKind::Load | AccessKind::Store => {
                Step::Access(self.access(event.kind, event.address))
            }
            AccessKind::Modify => {
                let load = self.access(AccessKind::Load, event.address);
                let store = self.access(AccessKind::Store, event.address);
                Step::Modify { load, store }
            }
        };
        tracing::trace!(%event, outcome = %step, clock = self.cache.clock());
        step
    }

    /// Replays `events` until the source is exhausted.
    pub fn run<I>(&mut self, events: I) -> &SimStats
    where
        I: IntoIterator<Item = TraceEvent>,
    {
        let mut processed = 0u64;
        for event in events {
            self.step(&event);
            processed += 1;
        }
        tracing::debug!(processed, stats = ?self.stats, "replay finished");
        &self.stats
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Consumes the simulator and returns the final statistics.
    pub fn into_stats(self) -> SimStats {
        self.stats
    }

    fn access(&mut self, kind: AccessKind, address: u64) -> AccessResult {
        let result = self.cache.access(address);
        self.stats.record(kind, result);
        result
    }
}
