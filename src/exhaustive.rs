//! # Exhaustive — Concurrent Cross-Validation of a Tier Against an Oracle
//!
//! Proves by brute force that a tier agrees with an independent [`Oracle`]
//! on every integer of `[lo, hi)`.
//!
//! ## Work Distribution
//!
//! The range is cut into fixed-size contiguous chunks. A single
//! [`ChunkCursor`] (a `Mutex<u128>`) marks the next unclaimed start; claiming
//! reads it, advances it by the chunk size and returns the old value, all
//! under the lock, so every chunk goes to exactly one worker. Chunks are
//! handed out in increasing order but may finish in any order; together they
//! cover the range with no gaps and no overlaps.
//!
//! Workers run on a fixed-size `rayon` pool whose size comes from
//! [`VerifyConfig::threads`], not from the core count.
//!
//! ## Failure Handling
//!
//! A disagreement is a proven correctness failure. The worker that sees it
//! raises the run's abort flag and sends a [`VerifyError::Mismatch`] over the
//! completion channel; the coordinator keeps the first error and waits for
//! the others to drain. Workers check the abort flag (and the caller's
//! [`CancelToken`]) once per chunk boundary: in-flight chunks complete, no
//! new chunk is claimed. Nothing is retried.
//!
//! A worker that panics (an arithmetic fault in a tier) is handled the same
//! way: the panic is caught, the abort flag raised and
//! [`VerifyError::WorkerLost`] reported.
//!
//! An optional join timeout bounds how long the coordinator waits; when it
//! fires the run is cancelled and reported as [`VerifyError::Timeout`].

use std::fmt;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use rug::Integer;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::VerifyConfig;
use crate::dispatch::{self, TierKind};
use crate::error::{PrimalityError, VerifyError};
use crate::oracle::Oracle;
use crate::progress::Progress;
use crate::sieve::PrimeSieve;
use crate::tier32::Tier32;
use crate::tier64::Tier64;
use crate::tier64_restricted::Tier64Restricted;
use crate::tier_big::TierBig;
use crate::witness::LIMIT_U64;

/// A primality decision procedure the verifier can drive.
pub trait TierUnderTest: Send + Sync {
    fn name(&self) -> &str;

    /// Exclusive upper bound of the values [`check`](Self::check) accepts.
    fn limit(&self) -> u128;

    fn check(&self, n: u128) -> Result<bool, PrimalityError>;
}

impl TierUnderTest for Tier32 {
    fn name(&self) -> &str {
        Tier32::NAME
    }

    fn limit(&self) -> u128 {
        u32::MAX as u128 + 1
    }

    fn check(&self, n: u128) -> Result<bool, PrimalityError> {
        let n = u32::try_from(n).map_err(|_| PrimalityError::range(Tier32::NAME, n, self.limit()))?;
        Ok(self.is_prime(n))
    }
}

impl TierUnderTest for Tier64Restricted {
    fn name(&self) -> &str {
        Tier64Restricted::NAME
    }

    fn limit(&self) -> u128 {
        Tier64Restricted::ARG_LIMIT as u128
    }

    fn check(&self, n: u128) -> Result<bool, PrimalityError> {
        let n = u64::try_from(n).map_err(|_| PrimalityError::range(Tier64Restricted::NAME, n, self.limit()))?;
        self.is_prime(n)
    }
}

impl TierUnderTest for Tier64 {
    fn name(&self) -> &str {
        Tier64::NAME
    }

    fn limit(&self) -> u128 {
        LIMIT_U64
    }

    fn check(&self, n: u128) -> Result<bool, PrimalityError> {
        let n = u64::try_from(n).map_err(|_| PrimalityError::range(Tier64::NAME, n, LIMIT_U64))?;
        Ok(self.is_prime(n))
    }
}

impl TierUnderTest for TierBig {
    fn name(&self) -> &str {
        TierBig::NAME
    }

    fn limit(&self) -> u128 {
        TierBig::ARG_LIMIT + 1
    }

    fn check(&self, n: u128) -> Result<bool, PrimalityError> {
        self.is_prime(&Integer::from(n))
    }
}

/// The public dispatch entry point, as a tier under test.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl TierUnderTest for Dispatcher {
    fn name(&self) -> &str {
        "dispatch"
    }

    fn limit(&self) -> u128 {
        TierBig::ARG_LIMIT + 1
    }

    fn check(&self, n: u128) -> Result<bool, PrimalityError> {
        dispatch::is_prime(n)
    }
}

/// The tier behind a [`TierKind`].
pub fn tier_under_test(kind: TierKind) -> Arc<dyn TierUnderTest> {
    match kind {
        TierKind::Tier32 => Arc::new(Tier32),
        TierKind::Tier64Restricted => Arc::new(Tier64Restricted),
        TierKind::Tier64 => Arc::new(Tier64),
        TierKind::TierBig => Arc::new(TierBig),
    }
}

/// Shared "next unclaimed start" of a verification range.
pub struct ChunkCursor {
    next: Mutex<u128>,
    hi: u128,
    chunk: u128,
}

impl ChunkCursor {
    pub fn new(lo: u128, hi: u128, chunk: u64) -> Self {
        ChunkCursor {
            next: Mutex::new(lo),
            hi,
            chunk: chunk.max(1) as u128,
        }
    }

    /// Claim the next chunk, or `None` once the range is exhausted.
    pub fn claim(&self) -> Result<Option<Range<u128>>, VerifyError> {
        let mut next = self
            .next
            .lock()
            .map_err(|_| VerifyError::WorkerLost("chunk cursor lock poisoned".into()))?;
        if *next >= self.hi {
            return Ok(None);
        }
        let start = *next;
        let end = start.saturating_add(self.chunk).min(self.hi);
        *next = end;
        Ok(Some(start..end))
    }
}

/// Cooperative cancellation flag, checked by workers between chunks.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub worker: usize,
    pub chunks: u64,
    pub tested: u64,
    pub primes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub tier: String,
    pub oracle: String,
    pub lo: u128,
    pub hi: u128,
    pub checked: u64,
    pub primes: u64,
    pub chunks: u64,
    pub workers: usize,
    pub cancelled: bool,
    pub elapsed_ms: u64,
}

impl VerifyReport {
    /// True when every value of the range was checked.
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.checked as u128 == self.hi - self.lo
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vs {} on [{}, {}): {} values, {} primes, {} chunks, {} workers, {} ms{}",
            self.tier,
            self.oracle,
            self.lo,
            self.hi,
            self.checked,
            self.primes,
            self.chunks,
            self.workers,
            self.elapsed_ms,
            if self.cancelled { " (cancelled)" } else { "" }
        )
    }
}

pub struct ExhaustiveVerifier {
    config: VerifyConfig,
    oracle: Oracle,
}

impl ExhaustiveVerifier {
    /// Build the verifier, constructing the sieve oracle once for all runs.
    pub fn new(config: VerifyConfig) -> Result<Self, VerifyError> {
        config.validate()?;
        let oracle = if config.sieve_limit > 0 {
            info!(limit = config.sieve_limit, "building sieve oracle");
            Oracle::with_sieve(Arc::new(PrimeSieve::new(config.sieve_limit)), config.certainty)
        } else {
            Oracle::probabilistic(config.certainty)
        };
        Ok(ExhaustiveVerifier { config, oracle })
    }

    pub fn with_oracle(config: VerifyConfig, oracle: Oracle) -> Result<Self, VerifyError> {
        config.validate()?;
        Ok(ExhaustiveVerifier { config, oracle })
    }

    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    pub fn oracle(&self) -> &Oracle {
        &self.oracle
    }

    /// Check `tier` against the oracle on every value of `[lo, hi)`.
    pub fn run(
        &self,
        tier: Arc<dyn TierUnderTest>,
        lo: u128,
        hi: u128,
    ) -> Result<VerifyReport, VerifyError> {
        self.run_with_cancel(tier, lo, hi, &CancelToken::new())
    }

    /// As [`run`](Self::run), stopping at the next chunk boundary once
    /// `cancel` fires. The token belongs to this run only.
    pub fn run_with_cancel(
        &self,
        tier: Arc<dyn TierUnderTest>,
        lo: u128,
        hi: u128,
        cancel: &CancelToken,
    ) -> Result<VerifyReport, VerifyError> {
        if lo >= hi {
            return Err(VerifyError::InvalidConfig(format!("empty range [{}, {})", lo, hi)));
        }
        if hi > tier.limit() {
            return Err(VerifyError::OutOfDomain {
                tier: tier.name().to_string(),
                lo,
                hi,
                limit: tier.limit(),
            });
        }

        let threads = self.config.threads;
        info!(
            tier = tier.name(),
            oracle = %self.oracle,
            lo = %lo,
            hi = %hi,
            threads,
            chunk_size = self.config.chunk_size,
            "verification started"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("verify-{}", i))
            .build()?;

        let cursor = Arc::new(ChunkCursor::new(lo, hi, self.config.chunk_size));
        let abort = CancelToken::new();
        let progress = Progress::new();
        let reporter = progress.start_reporter(self.config.report_interval());
        let (tx, rx) = mpsc::channel();

        for worker in 0..threads {
            let ctx = WorkerContext {
                worker,
                tier: Arc::clone(&tier),
                oracle: self.oracle.clone(),
                cursor: Arc::clone(&cursor),
                abort: abort.clone(),
                cancel: cancel.clone(),
                progress: Arc::clone(&progress),
            };
            let tx = tx.clone();
            let abort = abort.clone();
            pool.spawn(move || {
                // A panicking worker aborts the whole run, like a mismatch.
                let result = panic::catch_unwind(AssertUnwindSafe(|| ctx.run())).unwrap_or_else(|_| {
                    abort.cancel();
                    error!(worker, "verification worker panicked");
                    Err(VerifyError::WorkerLost(format!("worker {} panicked", worker)))
                });
                let _ = tx.send(result);
            });
        }
        drop(tx);

        let deadline = self.config.join_timeout().map(|d| Instant::now() + d);
        let mut summaries = Vec::with_capacity(threads);
        let mut failure: Option<VerifyError> = None;

        // Runs until every sender is gone: all workers reported, or panicked.
        loop {
            let received = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    rx.recv_timeout(remaining)
                }
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(Ok(summary)) => summaries.push(summary),
                Ok(Err(e)) => {
                    abort.cancel();
                    if failure.is_none() {
                        failure = Some(e);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    abort.cancel();
                    let secs = self.config.join_timeout_secs.unwrap_or_default();
                    warn!(secs, "verification timed out, cancelling workers");
                    if failure.is_none() {
                        failure = Some(VerifyError::Timeout { secs });
                    }
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        progress.stop();
        let _ = reporter.join();

        if let Some(e) = failure {
            error!(error = %e, "verification failed");
            return Err(e);
        }

        let cancelled = cancel.is_cancelled();
        let report = VerifyReport {
            tier: tier.name().to_string(),
            oracle: self.oracle.to_string(),
            lo,
            hi,
            checked: summaries.iter().map(|s| s.tested).sum(),
            primes: summaries.iter().map(|s| s.primes).sum(),
            chunks: summaries.iter().map(|s| s.chunks).sum(),
            workers: summaries.len(),
            cancelled,
            elapsed_ms: progress.elapsed().as_millis() as u64,
        };

        if cancelled {
            warn!(checked = report.checked, "verification cancelled before covering the range");
        } else if !report.is_complete() {
            return Err(VerifyError::WorkerLost(format!(
                "covered {} of {} values",
                report.checked,
                hi - lo
            )));
        } else {
            info!(
                tier = %report.tier,
                checked = report.checked,
                primes = report.primes,
                elapsed_ms = report.elapsed_ms,
                "verification passed"
            );
        }
        Ok(report)
    }
}

struct WorkerContext {
    worker: usize,
    tier: Arc<dyn TierUnderTest>,
    oracle: Oracle,
    cursor: Arc<ChunkCursor>,
    abort: CancelToken,
    cancel: CancelToken,
    progress: Arc<Progress>,
}

impl WorkerContext {
    fn run(&self) -> Result<WorkerSummary, VerifyError> {
        let mut summary = WorkerSummary {
            worker: self.worker,
            ..WorkerSummary::default()
        };

        while !self.abort.is_cancelled() && !self.cancel.is_cancelled() {
            let Some(range) = self.cursor.claim()? else {
                break;
            };
            debug!(worker = self.worker, start = %range.start, end = %range.end, "chunk claimed");
            self.progress
                .set_current(format!("[{}] {} - {}", self.worker, range.start, range.end));

            let (tested, primes) = match self.check_chunk(range) {
                Ok(counts) => counts,
                Err(e) => {
                    self.abort.cancel();
                    return Err(e);
                }
            };
            self.progress.record_chunk(tested, primes);
            summary.chunks += 1;
            summary.tested += tested;
            summary.primes += primes;
        }
        Ok(summary)
    }

    fn check_chunk(&self, range: Range<u128>) -> Result<(u64, u64), VerifyError> {
        let tested = (range.end - range.start) as u64;
        let mut primes = 0u64;
        for n in range {
            let expected = self.oracle.verdict(n);
            let actual = self.tier.check(n).map_err(|source| VerifyError::Tier {
                tier: self.tier.name().to_string(),
                n,
                source,
            })?;
            if expected != actual {
                error!(
                    worker = self.worker,
                    tier = self.tier.name(),
                    n = %n,
                    expected,
                    actual,
                    "tier disagrees with oracle"
                );
                return Err(VerifyError::Mismatch {
                    tier: self.tier.name().to_string(),
                    n,
                    expected,
                    actual,
                });
            }
            if actual {
                primes += 1;
            }
        }
        Ok((tested, primes))
    }
}
