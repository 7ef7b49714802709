//! Integration tests for configuration loading and validation.

use std::io::Write;
use std::path::Path;

use cache_simulator::common::ConfigError;
use cache_simulator::config::*;

/// Tests derived geometry values.
#[test]
fn test_cache_config_geometry() {
    let config = CacheConfig::new(4, 4, 2);

    assert_eq!(config.num_sets(), Some(16));
    assert_eq!(config.block_bytes(), Some(16));
    assert_eq!(config.total_lines().unwrap(), 32);
    assert_eq!(config.capacity_bytes(), Some(512));
    assert!(config.validate().is_ok());
}

/// Tests that zero set and block bits are accepted.
#[test]
fn test_cache_config_zero_bits() {
    let config = CacheConfig::new(0, 0, 1);

    assert!(config.validate().is_ok());
    assert_eq!(config.num_sets(), Some(1));
    assert_eq!(config.block_bytes(), Some(1));
}

/// Tests validation failures.
#[test]
fn test_cache_config_validate_errors() {
    assert!(matches!(
        CacheConfig::new(4, 4, 0).validate(),
        Err(ConfigError::ZeroLines)
    ));
    assert!(matches!(
        CacheConfig::new(60, 5, 1).validate(),
        Err(ConfigError::AddressWidth { .. })
    ));
    assert!(matches!(
        CacheConfig::new(60, 4, usize::MAX).validate(),
        Err(ConfigError::TooLarge { .. })
    ));
}

/// Tests parsing a complete configuration file.
#[test]
fn test_config_parse_full() {
    let config = Config::parse(
        r#"
        [general]
        verbose = true
        output = "json"
        trace = "traces/long.trace"

        [cache]
        set_bits = 5
        lines_per_set = 2
        block_bits = 3
        "#,
    )
    .unwrap();

    assert!(config.general.verbose);
    assert_eq!(config.general.output, OutputFormat::Json);
    assert_eq!(
        config.general.trace.as_deref(),
        Some(Path::new("traces/long.trace"))
    );
    assert_eq!(
        config.cache.resolve().unwrap(),
        CacheConfig::new(5, 3, 2)
    );
}

/// Tests defaults for an empty file.
#[test]
fn test_config_parse_empty() {
    let config = Config::parse("").unwrap();

    assert!(!config.general.verbose);
    assert_eq!(config.general.output, OutputFormat::Text);
    assert!(config.general.trace.is_none());
    assert!(matches!(
        config.cache.resolve(),
        Err(ConfigError::Missing("set bits (-s)"))
    ));
}

/// Tests rejection of an unknown output format.
#[test]
fn test_config_parse_bad_output() {
    assert!(Config::parse("[general]\noutput = \"xml\"\n").is_err());
}

/// Tests that explicit values take precedence over the fallback.
#[test]
fn test_partial_config_precedence() {
    let flags = PartialCacheConfig {
        set_bits: Some(2),
        block_bits: None,
        lines_per_set: None,
    };
    let file = PartialCacheConfig {
        set_bits: Some(8),
        block_bits: Some(6),
        lines_per_set: None,
    };

    let merged = flags.or(file);
    assert_eq!(merged.set_bits, Some(2));
    assert_eq!(merged.block_bits, Some(6));
    assert!(matches!(
        merged.resolve(),
        Err(ConfigError::Missing("lines per set (-E)"))
    ));
}

/// Tests loading the shipped default configuration.
#[test]
fn test_default_config_file() {
    let config = Config::parse(include_str!("../configs/default.toml")).unwrap();

    assert_eq!(config.cache.resolve().unwrap(), CacheConfig::new(4, 4, 1));
    assert_eq!(
        config.general.trace.as_deref(),
        Some(Path::new("traces/yi.trace"))
    );
}

/// Tests loading configuration from disk.
#[test]
fn test_config_load_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[cache]\nset_bits = 1\nblock_bits = 1\nlines_per_set = 4").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.cache.resolve().unwrap(), CacheConfig::new(1, 1, 4));
}

/// Tests load errors for missing and invalid files.
#[test]
fn test_config_load_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        Config::load(&missing),
        Err(ConfigError::Read { .. })
    ));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[cache]\nset_bits = \"four\"").unwrap();
    assert!(matches!(
        Config::load(file.path()),
        Err(ConfigError::Parse { .. })
    ));
}
