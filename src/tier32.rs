//! # Tier-32 — Narrow Candidates
//!
//! Cheapest tier: 32-bit operands with products taken in a 64-bit accumulator
//! ([`Widening32`]). Base 2 is always tested first; the remaining witnesses
//! depend on the band:
//!
//! - n < 2,047: {2} only.
//! - 2,047 ≤ n < 1,373,653: add 3.
//! - n ≥ 1,373,653: switch to {2, 7, 61}, with divisibility short-circuits for 7
//!   and 61.
//!
//! {2, 7, 61} is proven up to 4,759,123,141 > 2^32, so [`Tier32::is_prime`] is
//! exact for every `u32`. The dispatcher still only routes n ≤ 2^31−1 here
//! ([`Tier32::ARG_LIMIT`]); above that the restricted 64-bit tier takes over.

use crate::arith::{decompose, strong_probable_prime, Widening32};
use crate::witness::{LIMIT_BASE2, LIMIT_BASE2_3};

const PRIME1: u32 = 7;
const PRIME2: u32 = 61;

#[derive(Debug, Clone, Copy, Default)]
pub struct Tier32;

impl Tier32 {
    pub const NAME: &'static str = "tier32";

    /// Largest value the dispatcher sends to this tier (2^31 − 1).
    pub const ARG_LIMIT: u32 = i32::MAX as u32;

    pub fn new() -> Self {
        Tier32
    }

    pub fn is_prime(&self, n: u32) -> bool {
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

        if (n as u64) < LIMIT_BASE2_3 {
            if (n as u64) >= LIMIT_BASE2 {
                if n % 3 == 0 {
                    return n == 3;
                }
                if !try_witness(3, m, n, k) {
                    return false;
                }
            }
            // Below 2047 base 2 alone decides.
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
fn try_witness(a: u32, m: u32, n: u32, k: u32) -> bool {
    strong_probable_prime::<Widening32>(a, m, n, k)
}
