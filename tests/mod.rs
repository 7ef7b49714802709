//! Test module organization.
//!
//! This module organizes all integration tests for the cache simulator.

/// Cache model and LRU replacement tests.
mod cache_tests;


/// Configuration loading and validation tests.
mod config_tests;
