//! # Main — CLI Entry Point
//!
//! Routes subcommands to the library: `check` classifies numbers through the
//! dispatcher, `verify` runs an exhaustive tier-versus-oracle sweep, `tiers`
//! lists the tiers and their ranges.
//!
//! ## Global Options
//!
//! - `--config` / `MILLRAB_CONFIG`: TOML file with verifier defaults.
//! - `--threads` / `MILLRAB_THREADS`: worker pool size (overrides the config).
//!
//! Logs go to stderr (`LOG_FORMAT=json` for JSON lines, `RUST_LOG` to filter);
//! stdout carries only results.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "millrab",
    version,
    about = "Deterministic Miller-Rabin primality with exhaustive verification"
)]
struct Cli {
    /// Verifier config file (TOML)
    #[arg(long, global = true, env = "MILLRAB_CONFIG")]
    config: Option<PathBuf>,

    /// Worker threads for `verify` (overrides the config file)
    #[arg(long, global = true, env = "MILLRAB_THREADS")]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify each number as prime or composite
    Check {
        /// Decimal integers, up to 3317044064679887385961980
        #[arg(required = true, allow_hyphen_values = true)]
        numbers: Vec<String>,
    },
    /// Check a tier against the oracle on every value of [start, end)
    Verify {
        /// Tier under test
        #[arg(long, value_enum)]
        tier: TierArg,
        /// First value (inclusive)
        #[arg(long)]
        start: u128,
        /// Last value (exclusive)
        #[arg(long)]
        end: u128,
        /// Values per claimed chunk
        #[arg(long)]
        chunk_size: Option<u64>,
        /// Sieve oracle bound (0 disables the sieve)
        #[arg(long)]
        sieve_limit: Option<u64>,
        /// Repetitions for the probabilistic oracle
        #[arg(long)]
        certainty: Option<u32>,
        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the tiers and the ranges they cover
    Tiers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TierArg {
    #[value(name = "32")]
    Tier32,
    #[value(name = "64-restricted")]
    Tier64Restricted,
    #[value(name = "64")]
    Tier64,
    Big,
    Dispatch,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // LOG_FORMAT=json for log shippers, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    match &cli.command {
        Commands::Check { numbers } => cli::run_check(numbers),
        Commands::Verify { .. } => cli::run_verify(&cli),
        Commands::Tiers => cli::run_tiers(),
    }
}
