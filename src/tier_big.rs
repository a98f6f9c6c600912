//! # Tier-Big — Arbitrary-Precision Candidates
//!
//! Extends the 64-bit threshold table with two bands over the first 12 and 13
//! primes, reaching up to L = 3,317,044,064,679,887,385,961,981 − 1. Beyond L no
//! witness set is proven, so the tier refuses with
//! [`PrimalityError::UnsupportedRange`]; it never falls back to a
//! probabilistic answer.
//!
//! Arithmetic is GMP's via `rug`: `pow_mod` for a^m mod n and in-place
//! square-and-reduce for the squaring chain. No overflow handling is needed.

use rug::Integer;

use crate::error::PrimalityError;
use crate::witness::{witnesses_for, LIMIT_FIRST13};

#[derive(Debug, Clone, Copy, Default)]
pub struct TierBig;

impl TierBig {
    pub const NAME: &'static str = "tier-big";

    /// Largest supported candidate, inclusive.
    pub const ARG_LIMIT: u128 = LIMIT_FIRST13 - 1;

    pub fn new() -> Self {
        TierBig
    }

    /// The inclusive upper bound as an `Integer`.
    pub fn arg_limit() -> Integer {
        Integer::from(Self::ARG_LIMIT)
    }

    pub fn is_prime(&self, n: &Integer) -> Result<bool, PrimalityError> {
        if *n <= 1u32 {
            return Ok(false);
        }
        let witnesses = match n.to_u128().and_then(witnesses_for) {
            Some(w) => w,
            None => return Err(PrimalityError::unsupported(n, Self::ARG_LIMIT)),
        };

        for &w in witnesses {
            if n.is_divisible_u(w as u32) {
                return Ok(*n == w);
            }
        }

        let n1 = Integer::from(n - 1u32);
        let k = n1.find_one(0).unwrap_or(0);
        let m = Integer::from(&n1 >> k);

        Ok(witnesses
            .iter()
            .all(|&a| try_witness(a, &m, n, &n1, k)))
    }

    /// Convenience wrapper for callers holding a native `u128`.
    pub fn is_prime_u128(&self, n: u128) -> Result<bool, PrimalityError> {
        self.is_prime(&Integer::from(n))
    }
}

/// `m` is the odd part of n−1 for n ≥ 3, so it is positive and
/// `pow_mod` (which only fails for a negative exponent with no inverse) always
/// succeeds.
fn try_witness(a: u64, m: &Integer, n: &Integer, n1: &Integer, k: u32) -> bool {
    debug_assert!(*m > 0u32);
    let Ok(mut b) = Integer::from(a).pow_mod(m, n) else {
        unreachable!("pow_mod failed with positive exponent {}", m);
    };
    if b == 1u32 || b == *n1 {
        return true;
    }
    for _ in 1..k {
        b.square_mut();
        b %= n;
        if b == *n1 {
            return true;
        }
        if b == 1u32 {
            return false;
        }
    }
    false
}
