//! # Tier-64-Restricted — 64-bit Candidates Below the Squaring Bound
//!
//! Same band structure as Tier-32 ({2}, {2, 3}, {2, 7, 61}) on 64-bit words,
//! using the naive [`Narrow64`] product. That is only exact while every
//! residue squared fits a signed 64-bit accumulator, so the domain stops at
//! [`Tier64Restricted::ARG_LIMIT`] = 3,037,001,057, the first value at which
//! the `(b*b) % n` step was observed to overflow in an exhaustive search.
//! Anything at or above it is refused with [`PrimalityError::Range`] before
//! any arithmetic runs.

use crate::arith::{decompose, strong_probable_prime, Narrow64, NARROW64_SAFE_LIMIT};
use crate::error::PrimalityError;
use crate::witness::{LIMIT_BASE2, LIMIT_BASE2_3};

const PRIME1: u64 = 7;
const PRIME2: u64 = 61;

#[derive(Debug, Clone, Copy, Default)]
pub struct Tier64Restricted;

impl Tier64Restricted {
    pub const NAME: &'static str = "tier64-restricted";

    /// Exclusive upper bound of the domain.
    pub const ARG_LIMIT: u64 = NARROW64_SAFE_LIMIT;

    pub fn new() -> Self {
        Tier64Restricted
    }

    pub fn is_prime(&self, n: u64) -> Result<bool, PrimalityError> {
        if n >= Self::ARG_LIMIT {
            return Err(PrimalityError::range(Self::NAME, n, Self::ARG_LIMIT));
        }
        Ok(self.is_prime_unchecked(n))
    }

    /// Caller guarantees `n < ARG_LIMIT`.
    pub(crate) fn is_prime_unchecked(&self, n: u64) -> bool {
        debug_assert!(n < Self::ARG_LIMIT);
        if n <= 1 {
            return false;
        }
        if n % 2 == 0 {
            return n == 2;
        }

        let (k, m) = decompose(n);
        if !try_witness(2, m, n, k) {
            return false;
        }

        if n < LIMIT_BASE2_3 {
            if n >= LIMIT_BASE2 {
                if n % 3 == 0 {
                    return n == 3;
                }
                if !try_witness(3, m, n, k) {
                    return false;
                }
            }
        } else {
            if n % PRIME1 == 0 {
                return n == PRIME1;
            }
            if n % PRIME2 == 0 {
                return n == PRIME2;
            }
            if !try_witness(PRIME1, m, n, k) || !try_witness(PRIME2, m, n, k) {
                return false;
            }
        }
        true
    }
}

#[inline]
fn try_witness(a: u64, m: u64, n: u64, k: u32) -> bool {
    strong_probable_prime::<Narrow64>(a, m, n, k)
}
