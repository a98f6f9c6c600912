//! # Oracle — Independent Reference Verdicts
//!
//! The verifier never trusts a tier on its own: every value is also judged by
//! an oracle built from different machinery.
//!
//! - Below the sieve bound, the [`PrimeSieve`] bit table answers exactly.
//! - Above it (or with no sieve at all), GMP's `is_probably_prime` with a high
//!   repetition count stands in. It is only ever a reference, never a
//!   production answer.

use std::fmt;
use std::sync::Arc;

use rug::integer::IsPrime;
use rug::Integer;

use crate::sieve::PrimeSieve;

#[derive(Clone)]
pub struct Oracle {
    sieve: Option<Arc<PrimeSieve>>,
    certainty: u32,
}

impl Oracle {
    /// Sieve lookup up to the sieve's limit, probabilistic above it.
    pub fn with_sieve(sieve: Arc<PrimeSieve>, certainty: u32) -> Self {
        Oracle {
            sieve: Some(sieve),
            certainty,
        }
    }

    /// Probabilistic only.
    pub fn probabilistic(certainty: u32) -> Self {
        Oracle {
            sieve: None,
            certainty,
        }
    }

    pub fn sieve_limit(&self) -> Option<u64> {
        self.sieve.as_ref().map(|s| s.limit())
    }

    pub fn certainty(&self) -> u32 {
        self.certainty
    }

    /// Reference verdict for `n`.
    pub fn verdict(&self, n: u128) -> bool {
        if let Some(sieve) = &self.sieve {
            if let Ok(v) = u64::try_from(n) {
                if sieve.contains(v) {
                    return sieve.is_prime(v);
                }
            }
        }
        Integer::from(n).is_probably_prime(self.certainty) != IsPrime::No
    }
}

impl fmt::Debug for Oracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Oracle")
            .field("sieve_limit", &self.sieve_limit())
            .field("certainty", &self.certainty)
            .finish()
    }
}

impl fmt::Display for Oracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sieve_limit() {
            Some(limit) => write!(f, "sieve(<= {}) + mr({})", limit, self.certainty),
            None => write!(f, "mr({})", self.certainty),
        }
    }
}
