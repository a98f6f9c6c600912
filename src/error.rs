//! # Error — Range and Verification Failures
//!
//! Two error families:
//!
//! - [`PrimalityError`]: precondition failures raised by a tier or the
//!   dispatcher *before* any arithmetic is performed. An in-domain call never
//!   produces one of these; the witness sets are proofs, so every in-domain
//!   answer is definite.
//! - [`VerifyError`]: fatal outcomes of an exhaustive verification run. A
//!   [`VerifyError::Mismatch`] means a tier disagreed with its oracle and the
//!   whole run is invalid; it is never retried.
//!
//! Magnitudes are carried as decimal strings so the same variant can describe
//! a `u32`, a `u64` or an arbitrary-precision candidate.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimalityError {
    /// The candidate lies outside the proven domain of a specific tier.
    #[error("{tier}: {n} is outside the tier's domain (must be < {limit})")]
    Range {
        tier: &'static str,
        n: String,
        limit: String,
    },
    /// No verified witness set exists for this magnitude.
    #[error("no verified witness set for {n} (supported: n <= {max})")]
    UnsupportedRange { n: String, max: String },
}

impl PrimalityError {
    pub(crate) fn range(tier: &'static str, n: impl ToString, limit: impl ToString) -> Self {
        PrimalityError::Range {
            tier,
            n: n.to_string(),
            limit: limit.to_string(),
        }
    }

    pub(crate) fn unsupported(n: impl ToString, max: impl ToString) -> Self {
        PrimalityError::UnsupportedRange {
            n: n.to_string(),
            max: max.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum VerifyError {
    /// A tier's verdict disagreed with the oracle.
    #[error("{tier} disagrees with oracle at n = {n}: oracle says {expected}, tier says {actual}")]
    Mismatch {
        tier: String,
        n: u128,
        expected: bool,
        actual: bool,
    },
    /// The tier under test refused a value inside the verified range.
    #[error("{tier} failed at n = {n}: {source}")]
    Tier {
        tier: String,
        n: u128,
        #[source]
        source: PrimalityError,
    },
    #[error("range [{lo}, {hi}) exceeds the domain of {tier} (limit {limit})")]
    OutOfDomain {
        tier: String,
        lo: u128,
        hi: u128,
        limit: u128,
    },
    #[error("invalid verification config: {0}")]
    InvalidConfig(String),
    #[error("verification did not finish within {secs}s")]
    Timeout { secs: u64 },
    #[error("could not build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("worker lost: {0}")]
    WorkerLost(String),
}

impl VerifyError {
    /// True for errors that prove a tier wrong, as opposed to run-level faults.
    pub fn is_correctness_failure(&self) -> bool {
        matches!(self, VerifyError::Mismatch { .. } | VerifyError::Tier { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_message_names_tier_and_limit() {
        let e = PrimalityError::range("tier64-restricted", 3_037_001_057u64, 3_037_001_057u64);
        let msg = e.to_string();
        assert!(msg.contains("tier64-restricted"), "{}", msg);
        assert!(msg.contains("3037001057"), "{}", msg);
    }

    #[test]
    fn unsupported_error_message() {
        let e = PrimalityError::unsupported("3317044064679887385961981", "3317044064679887385961980");
        assert!(e.to_string().starts_with("no verified witness set"));
    }

    #[test]
    fn mismatch_is_correctness_failure() {
        let e = VerifyError::Mismatch {
            tier: "tier32".into(),
            n: 2047,
            expected: false,
            actual: true,
        };
        assert!(e.is_correctness_failure());
        assert!(e.to_string().contains("n = 2047"));
        assert!(!VerifyError::Timeout { secs: 5 }.is_correctness_failure());
    }
}
