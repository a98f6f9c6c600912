//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim: number
//! classification, exhaustive verification runs and the tier listing.

use anyhow::{Context, Result};
use millrab::config::VerifyConfig;
use millrab::exhaustive::{self, Dispatcher, ExhaustiveVerifier, TierUnderTest};
use millrab::{dispatch, TierKind};
use rug::Integer;
use std::sync::Arc;
use tracing::info;

use super::{Cli, Commands, TierArg};

// ── Check ───────────────────────────────────────────────────────

/// Print `<n> prime` or `<n> composite` per number, stopping at the first
/// value that cannot be decided.
pub fn run_check(numbers: &[String]) -> Result<()> {
    for text in numbers {
        let n: Integer = text
            .trim()
            .parse()
            .with_context(|| format!("invalid integer: {}", text))?;
        let verdict = dispatch::is_prime(&n).with_context(|| format!("cannot decide {}", n))?;
        println!("{} {}", n, if verdict { "prime" } else { "composite" });
    }
    Ok(())
}

// ── Verify ──────────────────────────────────────────────────────

fn tier_for(arg: TierArg) -> Arc<dyn TierUnderTest> {
    match arg {
        TierArg::Tier32 => exhaustive::tier_under_test(TierKind::Tier32),
        TierArg::Tier64Restricted => exhaustive::tier_under_test(TierKind::Tier64Restricted),
        TierArg::Tier64 => exhaustive::tier_under_test(TierKind::Tier64),
        TierArg::Big => exhaustive::tier_under_test(TierKind::TierBig),
        TierArg::Dispatch => Arc::new(Dispatcher),
    }
}

/// Config file (or defaults), then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<VerifyConfig> {
    let mut config = match &cli.config {
        Some(path) => VerifyConfig::load(path)?,
        None => VerifyConfig::default(),
    };
    if let Some(threads) = cli.threads {
        config.threads = threads;
    }
    if let Commands::Verify {
        chunk_size,
        sieve_limit,
        certainty,
        timeout,
        ..
    } = &cli.command
    {
        if let Some(v) = chunk_size {
            config.chunk_size = *v;
        }
        if let Some(v) = sieve_limit {
            config.sieve_limit = *v;
        }
        if let Some(v) = certainty {
            config.certainty = *v;
        }
        if timeout.is_some() {
            config.join_timeout_secs = *timeout;
        }
    }
    Ok(config)
}

pub fn run_verify(cli: &Cli) -> Result<()> {
    let Commands::Verify {
        tier,
        start,
        end,
        json,
        ..
    } = &cli.command
    else {
        anyhow::bail!("run_verify called for a non-verify command");
    };

    let mut config = resolve_config(cli)?;
    // No point sieving past the last value of the range.
    let last = u64::try_from(end.saturating_sub(1)).unwrap_or(u64::MAX);
    config.sieve_limit = config.sieve_limit.min(last);

    let tier = tier_for(*tier);
    info!(
        tier = tier.name(),
        start = %start,
        end = %end,
        threads = config.threads,
        "millrab verify"
    );

    let verifier = ExhaustiveVerifier::new(config)?;
    let report = verifier.run(tier, *start, *end)?;

    if *json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("PASS {}", report);
    }
    Ok(())
}

// ── Tiers ───────────────────────────────────────────────────────

pub fn run_tiers() -> Result<()> {
    println!("{:<20} {:>28} {:>28}", "tier", "domain max", "dispatched up to");
    for kind in TierKind::ALL {
        let domain_max = exhaustive::tier_under_test(kind).limit() - 1;
        println!(
            "{:<20} {:>28} {:>28}",
            kind.name(),
            domain_max,
            kind.dispatch_max()
        );
    }
    Ok(())
}
