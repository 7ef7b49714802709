//! Integration tests for the cache model.

use cache_simulator::common::ConfigError;
use cache_simulator::config::CacheConfig;
use cache_simulator::core::cache::lru::{select_victim, LruCandidate};
use cache_simulator::core::{AccessResult, Cache, CacheLine};

/// Creates a small cache: `2^s` sets, `2^b`-byte blocks, `E` ways.
fn create_cache(s: u32, b: u32, e: usize) -> Cache {
    Cache::new(&CacheConfig::new(s, b, e)).unwrap()
}

/// Tests cache creation and initialization.
#[test]
fn test_cache_creation() {
    let cache = create_cache(2, 4, 3);

    assert_eq!(cache.num_sets(), 4);
    assert_eq!(cache.ways(), 3);
    assert_eq!(cache.clock(), 0);
    for set in 0..cache.num_sets() {
        let lines = cache.set(set);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| *l == CacheLine::default()));
    }
}

/// Tests that invalid geometries are rejected before allocation.
#[test]
fn test_cache_rejects_bad_config() {
    assert!(matches!(
        Cache::new(&CacheConfig::new(1, 1, 0)),
        Err(ConfigError::ZeroLines)
    ));
    assert!(matches!(
        Cache::new(&CacheConfig::new(40, 25, 1)),
        Err(ConfigError::AddressWidth {
            set_bits: 40,
            block_bits: 25
        })
    ));
    assert!(matches!(
        Cache::new(&CacheConfig::new(63, 1, 1)),
        Err(ConfigError::TooLarge { .. })
    ));
}

/// Tests cache hit behavior after initial miss.
#[test]
fn test_cache_access_hit() {
    let mut cache = create_cache(1, 1, 1);

    assert_eq!(cache.access(0x0), AccessResult::MISS);
    assert_eq!(cache.access(0x0), AccessResult::HIT);
}

/// Tests that presence checks do not disturb state.
#[test]
fn test_cache_contains() {
    let mut cache = create_cache(1, 1, 1);

    assert!(!cache.contains(0x1000));
    cache.access(0x1000);
    let clock = cache.clock();

    assert!(cache.contains(0x1000));
    assert!(cache.contains(0x1001));
    assert_eq!(cache.clock(), clock);
}

/// Tests that the logical clock advances once per resolved access.
#[test]
fn test_clock_advances_per_access() {
    let mut cache = create_cache(0, 0, 2);

    cache.access(0x0);
    cache.access(0x0);
    cache.access(0x1);
    cache.access(0x2);

    assert_eq!(cache.clock(), 4);
}

/// Tests cache line alignment behavior.
#[test]
fn test_cache_line_alignment() {
    let mut cache = create_cache(2, 4, 1);

    assert!(!cache.access(0x10).hit);
    assert!(cache.access(0x11).hit);
    assert!(cache.access(0x1F).hit);
    assert!(!cache.access(0x20).hit);
}

/// Tests direct-mapped conflict eviction in a single-line cache.
#[test]
fn test_cache_direct_mapped_eviction() {
    let mut cache = create_cache(0, 0, 1);

    assert_eq!(cache.access(0x0), AccessResult::MISS);
    assert_eq!(cache.access(0x1), AccessResult::MISS_EVICTION);

    assert!(cache.contains(0x1));
    assert!(!cache.contains(0x0));
}

/// Tests that sets are independent.
#[test]
fn test_cache_multiple_sets() {
    let mut cache = create_cache(1, 0, 1);

    cache.access(0x0);
    cache.access(0x1);
    assert!(cache.contains(0x0));
    assert!(cache.contains(0x1));

    assert_eq!(cache.access(0x2), AccessResult::MISS_EVICTION);
    assert!(!cache.contains(0x0));
    assert!(cache.contains(0x1));
    assert!(cache.contains(0x2));
}

/// Tests LRU replacement policy.
#[test]
fn test_cache_replacement_lru() {
    let mut cache = create_cache(0, 0, 2);

    assert_eq!(cache.access(0x0), AccessResult::MISS);
    assert_eq!(cache.access(0x1), AccessResult::MISS);
    assert_eq!(cache.access(0x2), AccessResult::MISS_EVICTION);

    assert!(!cache.contains(0x0), "LRU line should have been evicted");
    assert!(cache.contains(0x1));
    assert!(cache.contains(0x2));
}

/// Tests that a hit refreshes recency.
#[test]
fn test_cache_hit_refreshes_recency() {
    let mut cache = create_cache(0, 0, 2);

    cache.access(0x0);
    cache.access(0x1);
    assert_eq!(cache.next_victim(0), Some(0));

    assert!(cache.access(0x0).hit);
    assert_eq!(cache.next_victim(0), Some(1));

    cache.access(0x2);
    assert!(cache.contains(0x0));
    assert!(!cache.contains(0x1));
}

/// Tests that misses fill the first invalid slot in order.
#[test]
fn test_cache_fills_first_empty_slot() {
    let mut cache = create_cache(0, 0, 4);

    for (i, addr) in [0x7u64, 0x3, 0x5].into_iter().enumerate() {
        cache.access(addr);
        assert!(cache.set(0)[i].holds(addr));
    }
    assert!(!cache.set(0)[3].valid);
    assert_eq!(cache.next_victim(0), None);
}

/// Tests that the candidate only moves on a strictly smaller stamp.
#[test]
fn test_lru_tie_break_first_slot_wins() {
    let mut candidate = LruCandidate::new();
    assert_eq!(candidate.victim(), None);

    candidate.observe(0, 5);
    candidate.observe(1, 5);
    assert_eq!(candidate.victim(), Some(0));

    candidate.observe(2, 3);
    candidate.observe(3, 3);
    assert_eq!(candidate.victim(), Some(2));
}

/// Tests victim selection over a set slice, skipping invalid lines.
#[test]
fn test_select_victim() {
    let line = |valid, last_used| CacheLine {
        valid,
        tag: 0,
        last_used,
    };

    assert_eq!(select_victim(&[line(false, 0), line(false, 0)]), None);
    assert_eq!(
        select_victim(&[line(false, 0), line(true, 9), line(true, 4), line(true, 4)]),
        Some(2)
    );
}
