//! Set-Associative Cache Model.
//!
//! The cache tracks residency only. Each access resolves to exactly one of
//! three outcomes: a hit, a miss that fills an empty line, or a miss that
//! evicts the least recently used line of a full set.
//!
//! Lines live in one flat vector of `S * E` entries indexed by
//! `set * E + way`. The vector is sized once at construction and never
//! resized.

/// Cache line state.
pub mod line;

/// LRU victim selection.
pub mod lru;

use crate::common::addr::AddressDecoder;
use crate::common::error::ConfigError;
use crate::config::CacheConfig;

pub use line::CacheLine;
use lru::LruCandidate;

/// Outcome of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AccessResult {
    /// The tag was resident in the target set.
    pub hit: bool,

    /// A valid line was replaced to make room. Implies `!hit`.
    pub evicted: bool,
}

impl AccessResult {
    pub const HIT: Self = Self {
        hit: true,
        evicted: false,
    };
    pub const MISS: Self = Self {
        hit: false,
        evicted: false,
    };
    pub const MISS_EVICTION: Self = Self {
        hit: false,
        evicted: true,
    };
}

/// A set-associative cache with LRU replacement.
#[derive(Debug, Clone)]
pub struct Cache {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    decoder: AddressDecoder,
    /// Logical clock. Advanced once per resolved access.
    clock: u64,
}

impl Cache {
    /// Allocates `S` sets of `E` invalid lines.
    ///
    /// # Errors
    ///
    /// Any `ConfigError` from validating `config`, or
    /// `ConfigError::TooLarge` if the line array cannot be allocated.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let decoder = AddressDecoder::new(config.set_bits, config.block_bits)?;
        let total = config.total_lines()?;
        let too_large = || ConfigError::TooLarge {
            set_bits: config.set_bits,
            lines_per_set: config.lines_per_set,
        };

        let mut lines = Vec::new();
        lines.try_reserve_exact(total).map_err(|_| too_large())?;
        lines.resize(total, CacheLine::default());

        tracing::debug!(
            sets = total / config.lines_per_set,
            ways = config.lines_per_set,
            block_bytes = config.block_bytes(),
            "allocated cache"
        );

        Ok(Self {
            lines,
            num_sets: total / config.lines_per_set,
            ways: config.lines_per_set,
            decoder,
            clock: 0,
        })
    }

    /// Number of sets, `S`.
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Lines per set, `E`.
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Current logical clock value.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Returns the lines of set `index` in slot order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_sets()`.
    pub fn set(&self, index: usize) -> &[CacheLine] {
        let base = index * self.ways;
        &self.lines[base..base + self.ways]
    }

    /// Returns `true` if the block containing `address` is resident.
    ///
    /// Does not touch recency or the clock.
    pub fn contains(&self, address: u64) -> bool {
        let addr = self.decoder.decode(address);
        self.set(addr.set_index as usize)
            .iter()
            .any(|line| line.holds(addr.tag))
    }

    /// Slot that the next conflicting miss in set `index` would evict.
    ///
    /// Returns `None` while the set still has an invalid line.
    pub fn next_victim(&self, index: usize) -> Option<usize> {
        let set = self.set(index);
        if set.iter().any(|line| !line.valid) {
            return None;
        }
        lru::select_victim(set)
    }

    /// Performs one access to `address`.
    ///
    /// Scans the target set in slot order. A matching valid line is a hit
    /// and has its stamp refreshed. Otherwise the first invalid slot is
    /// filled, or, in a full set, the LRU line is overwritten.
    pub fn access(&mut self, address: u64) -> AccessResult {
        let addr = self.decoder.decode(address);
        let base = addr.set_index as usize * self.ways;
        let set = &mut self.lines[base..base + self.ways];

        let mut empty = None;
        let mut lru = LruCandidate::new();

        for (way, line) in set.iter_mut().enumerate() {
            if line.valid {
                if line.tag == addr.tag {
                    line.last_used = self.clock;
                    self.clock += 1;
                    return AccessResult::HIT;
                }
                lru.observe(way, line.last_used);
            } else if empty.is_none() {
                empty = Some(way);
            }
        }

        let now = self.clock;
        self.clock += 1;

        match (empty, lru.victim()) {
            (Some(way), _) => {
                set[way].fill(addr.tag, now);
                AccessResult::MISS
            }
            (None, Some(way)) => {
                set[way].fill(addr.tag, now);
                AccessResult::MISS_EVICTION
            }
            // Unreachable for E >= 1: a set without an invalid slot has a
            // valid candidate.
            (None, None) => AccessResult::MISS,
        }
    }
}
