//! Cache Simulator CLI.
//!
//! Replays a memory trace against a set-associative cache and prints the
//! resulting hit and miss counts.
//!
//! # Usage
//!
//! ```text
//! csim -s 4 -E 1 -b 4 -t traces/yi.trace
//! csim --config cache.toml -v
//! ```

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cache_simulator::common::ConfigError;
use cache_simulator::config::{Config, OutputFormat, PartialCacheConfig};
use cache_simulator::sim::{Simulator, Step, TraceReader};

/// Command-line arguments for the cache simulator.
///
/// Geometry flags override the values from `--config`.
#[derive(Parser, Debug)]
#[command(author, version, about = "Set-Associative Cache Simulator")]
struct Args {
    /// Number of set index bits (S = 2^s sets).
    #[arg(short = 's', value_name = "num")]
    set_bits: Option<u32>,

    /// Number of lines per set.
    #[arg(short = 'E', value_name = "num")]
    lines_per_set: Option<usize>,

    /// Number of block offset bits (B = 2^b bytes per block).
    #[arg(short = 'b', value_name = "num")]
    block_bits: Option<u32>,

    /// Trace file.
    #[arg(short = 't', value_name = "file")]
    trace: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the outcome of every trace record.
    #[arg(short, long)]
    verbose: bool,

    /// Print statistics as JSON.
    #[arg(long)]
    json: bool,
}

/// Main entry point for the cache simulator.
///
/// # Behavior
///
/// 1. **Configuration**: Parses arguments and merges them over the optional
///    TOML file. Any configuration error exits with status 1 before a cache
///    is built.
/// 2. **Replay**: Streams the trace through the simulator. A malformed
///    record ends the trace early without failing the run.
/// 3. **Report**: Prints the final statistics.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let file = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let flags = PartialCacheConfig {
        set_bits: args.set_bits,
        block_bits: args.block_bits,
        lines_per_set: args.lines_per_set,
    };
    let cache_config = flags.or(file.cache).resolve()?;

    let trace_path = args
        .trace
        .or(file.general.trace)
        .ok_or(ConfigError::Missing("trace file (-t)"))?;
    let verbose = args.verbose || file.general.verbose;
    let output = if args.json {
        OutputFormat::Json
    } else {
        file.general.output
    };

    let mut reader = TraceReader::open(&trace_path)?;
    let mut sim = Simulator::new(&cache_config)?;

    tracing::info!(
        s = cache_config.set_bits,
        b = cache_config.block_bits,
        e = cache_config.lines_per_set,
        trace = %trace_path.display(),
        "starting replay"
    );

    if verbose {
        for event in reader.by_ref() {
            let step = sim.step(&event);
            if step != Step::Ignored {
                println!("{} {}", event, step);
            }
        }
    } else {
        sim.run(reader.by_ref());
    }

    if let Some(err) = reader.stopped_by() {
        eprintln!("warning: {}", err);
    }

    let stats = sim.into_stats();
    match output {
        OutputFormat::Text => stats.print(),
        OutputFormat::Json => {
            println!("{}", stats.to_json().context("failed to encode statistics")?)
        }
    }
    Ok(())
}
