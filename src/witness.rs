//! # Witness — Deterministic Miller–Rabin Threshold Tables
//!
//! Each bound below is a published value from OEIS
//! [A014233](https://oeis.org/A014233) (smallest odd composite that is a strong
//! pseudoprime to all of the first k prime bases) or a known special witness
//! set. Below the bound, the listed witnesses detect every composite, so the
//! test is a proof rather than a probability.
//!
//! | Upper bound (exclusive)             | Witnesses                                  |
//! |-------------------------------------|--------------------------------------------|
//! | 2,047                               | {2}                                        |
//! | 1,373,653                           | {2, 3}                                     |
//! | 4,759,123,141                       | {2, 7, 61}                                 |
//! | 2,152,302,898,747                   | first 5 primes                             |
//! | 3,474,749,660,383                   | first 6 primes                             |
//! | 2^64                                | {2, 325, 9375, 28178, 450775, 9780504, 1795265022} |
//! | 318,665,857,834,031,151,167,461     | first 12 primes                            |
//! | 3,317,044,064,679,887,385,961,981   | first 13 primes                            |
//!
//! Every tier re-expresses this same table at its own width. The fixed-width
//! tiers read [`witnesses_u64`]; the arbitrary-precision tier extends it with
//! the two bands above 2^64 ([`BIG_BANDS`]).

pub const LIMIT_BASE2: u64 = 2_047;
pub const LIMIT_BASE2_3: u64 = 1_373_653;
pub const LIMIT_SPECIAL_2_7_61: u64 = 4_759_123_141;
pub const LIMIT_FIRST5: u64 = 2_152_302_898_747;
pub const LIMIT_FIRST6: u64 = 3_474_749_660_383;
pub const LIMIT_U64: u128 = 1 << 64;
pub const LIMIT_FIRST12: u128 = 318_665_857_834_031_151_167_461;
pub const LIMIT_FIRST13: u128 = 3_317_044_064_679_887_385_961_981;

/// The first 13 primes; prefixes of this array are the "first k primes" sets.
pub const FIRST_PRIMES: [u64; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Jaeschke's three-base set, valid below 4,759,123,141.
pub const SPECIAL_2_7_61: [u64; 3] = [2, 7, 61];

/// Sinclair's seven-base set, valid for every 64-bit n.
pub const SPECIAL_U64: [u64; 7] = [2, 325, 9375, 28178, 450775, 9780504, 1795265022];

/// The 64-bit bands as (exclusive bound, witnesses), strictly increasing in bound.
pub const U64_BANDS: [(u128, &[u64]); 6] = [
    (LIMIT_BASE2 as u128, &[2]),
    (LIMIT_BASE2_3 as u128, &[2, 3]),
    (LIMIT_SPECIAL_2_7_61 as u128, &SPECIAL_2_7_61),
    (LIMIT_FIRST5 as u128, &[2, 3, 5, 7, 11]),
    (LIMIT_FIRST6 as u128, &[2, 3, 5, 7, 11, 13]),
    (LIMIT_U64, &SPECIAL_U64),
];

/// The two bands beyond 2^64, used only by the arbitrary-precision tier.
pub const BIG_BANDS: [(u128, &[u64]); 2] = [
    (LIMIT_FIRST12, &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37]),
    (LIMIT_FIRST13, &FIRST_PRIMES),
];

/// Witness set for a 64-bit candidate: the band with the smallest bound
/// exceeding `n`.
pub fn witnesses_u64(n: u64) -> &'static [u64] {
    let n = n as u128;
    for &(bound, witnesses) in &U64_BANDS {
        if n < bound {
            return witnesses;
        }
    }
    // n < 2^64 always holds for a u64.
    &SPECIAL_U64
}

/// Witness set for any candidate below [`LIMIT_FIRST13`], or `None` beyond it.
pub fn witnesses_for(n: u128) -> Option<&'static [u64]> {
    U64_BANDS
        .iter()
        .chain(BIG_BANDS.iter())
        .find(|&&(bound, _)| n < bound)
        .map(|&(_, witnesses)| witnesses)
}
