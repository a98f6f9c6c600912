//! # Tier-64-General — Full 64-bit Range
//!
//! Table-driven: [`witnesses_u64`] picks the witness set of the band with the
//! smallest bound exceeding n, every witness is first used as a trial divisor
//! (n divisible by a witness is prime only if it *is* that witness), then the
//! strong test runs with the exact [`Wide128`] product. The 2^64 band
//! ({2, 325, 9375, 28178, 450775, 9780504, 1795265022}) covers everything from
//! 3,474,749,660,383 to `u64::MAX`, so the tier is total over `u64`.

use crate::arith::{decompose, strong_probable_prime, Wide128};
use crate::witness::witnesses_u64;

#[derive(Debug, Clone, Copy, Default)]
pub struct Tier64;

impl Tier64 {
    pub const NAME: &'static str = "tier64";

    pub fn new() -> Self {
        Tier64
    }

    pub fn is_prime(&self, n: u64) -> bool {
        if n <= 1 {
            return false;
        }

        let witnesses = witnesses_u64(n);
        for &w in witnesses {
            if n % w == 0 {
                return n == w;
            }
        }

        let (k, m) = decompose(n);
        witnesses
            .iter()
            .all(|&a| strong_probable_prime::<Wide128>(a, m, n, k))
    }
}
