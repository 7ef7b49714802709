//! Cache model core.
//!
//! Owns all mutable cache state: the line array and the logical clock
//! used to order accesses for LRU replacement.

/// Set-associative cache with LRU replacement.
pub mod cache;

pub use cache::{AccessResult, Cache, CacheLine};
