//! Property-based tests for millrab's arithmetic kernels and tiers.
//!
//! These tests use the `proptest` framework to check invariants across
//! thousands of random inputs, comparing every fast path against GMP
//! (`rug::Integer`) as an independent reference.
//!
//! # How to run
//!
//! ```bash
//! cargo test --test property_tests
//!
//! # Increase case count for thorough testing (default is 256):
//! PROPTEST_CASES=10000 cargo test --test property_tests
//! ```
//!
//! # Testing strategy
//!
//! - **Kernels**: `mul_mod` / `pow_mod` for each multiplication strategy
//!   against `rug`, including operands near `u64::MAX`.
//! - **Tiers**: every tier agrees with GMP's probabilistic test on its
//!   domain, and with every other tier on the overlap of their domains.
//! - **Dispatcher**: results are independent of the candidate's width and
//!   repeated calls give the same answer.
//!
//! Each property is named `prop_<subject>_<invariant>`.

use millrab::arith::{self, MulMod, Narrow64, Wide128, Widening32, NARROW64_SAFE_LIMIT};
use millrab::{is_prime, is_prime_u64, Candidate, Tier32, Tier64, Tier64Restricted, TierBig};
use proptest::prelude::*;
use rug::integer::IsPrime;
use rug::Integer;

fn gmp_prime(n: u128) -> bool {
    Integer::from(n).is_probably_prime(40) != IsPrime::No
}

// == Kernel Properties =========================================================

proptest! {
    /// (a * b) mod m with a full double-width product equals GMP's answer for
    /// any u64 modulus, including the top of the range.
    #[test]
    fn prop_wide128_mul_mod_matches_rug(a: u64, b: u64, m in 1u64..) {
        let expected = Integer::from(a % m) * Integer::from(b % m) % Integer::from(m);
        prop_assert_eq!(Integer::from(Wide128::mul_mod(a % m, b % m, m)), expected);
    }

    #[test]
    fn prop_mul_mod_u64_near_max(da in 0u64..1000, db in 0u64..1000, dm in 0u64..1000) {
        let m = u64::MAX - dm;
        let a = u64::MAX - da;
        let b = u64::MAX - db;
        let expected = Integer::from(a) * Integer::from(b) % Integer::from(m);
        prop_assert_eq!(Integer::from(arith::mul_mod_u64(a, b, m)), expected);
    }

    #[test]
    fn prop_pow_mod_u64_matches_rug(base: u64, exp: u64, m in 1u64..) {
        let expected = Integer::from(base)
            .pow_mod(&Integer::from(exp), &Integer::from(m))
            .unwrap();
        prop_assert_eq!(Integer::from(arith::pow_mod_u64(base, exp, m)), expected);
    }

    /// The naive 64-bit product is exact for every modulus below the safe bound.
    #[test]
    fn prop_narrow64_exact_below_limit(m in 1u64..NARROW64_SAFE_LIMIT, a: u64, b: u64) {
        let (a, b) = (a % m, b % m);
        prop_assert_eq!(Narrow64::mul_mod(a, b, m), Wide128::mul_mod(a, b, m));
    }

    #[test]
    fn prop_widening32_pow_mod_matches_wide(base: u32, exp: u32, m in 1u32..) {
        let narrow = Widening32::pow_mod(base, exp, m) as u64;
        prop_assert_eq!(narrow, Wide128::pow_mod(base as u64, exp as u64, m as u64));
    }
}

// == Tier Properties ===========================================================

proptest! {
    #[test]
    fn prop_tier32_matches_gmp(n: u32) {
        prop_assert_eq!(Tier32.is_prime(n), gmp_prime(n as u128));
    }

    #[test]
    fn prop_tier64_matches_gmp(n: u64) {
        prop_assert_eq!(Tier64.is_prime(n), gmp_prime(n as u128));
    }

    /// Odd inputs are far more likely to exercise the witness loop.
    #[test]
    fn prop_tier64_matches_gmp_odd(n in any::<u64>().prop_map(|n| n | 1)) {
        prop_assert_eq!(Tier64.is_prime(n), gmp_prime(n as u128));
    }

    #[test]
    fn prop_tier_big_matches_gmp(n in (1u128 << 64)..=TierBig::ARG_LIMIT) {
        prop_assert_eq!(TierBig.is_prime_u128(n).unwrap(), gmp_prime(n));
    }

    /// Tier-32, Tier-64-Restricted, Tier-64 and Tier-Big agree wherever
    /// their domains overlap.
    #[test]
    fn prop_tiers_agree_below_2_31(n in 0u32..(1u32 << 31)) {
        let t32 = Tier32.is_prime(n);
        prop_assert_eq!(Tier64Restricted.is_prime(n as u64).unwrap(), t32);
        prop_assert_eq!(Tier64.is_prime(n as u64), t32);
        prop_assert_eq!(TierBig.is_prime(&Integer::from(n)).unwrap(), t32);
    }

    #[test]
    fn prop_restricted_agrees_with_tier64(n in 0u64..NARROW64_SAFE_LIMIT) {
        prop_assert_eq!(Tier64Restricted.is_prime(n).unwrap(), Tier64.is_prime(n));
    }

    #[test]
    fn prop_restricted_rejects_beyond_limit(n in NARROW64_SAFE_LIMIT..) {
        prop_assert!(Tier64Restricted.is_prime(n).is_err());
    }

    #[test]
    fn prop_tier_big_agrees_with_tier64(n: u64) {
        prop_assert_eq!(TierBig.is_prime(&Integer::from(n)).unwrap(), Tier64.is_prime(n));
    }
}

// == Dispatcher Properties =====================================================

proptest! {
    /// The answer depends on the value only, never on how wide it was handed in.
    #[test]
    fn prop_dispatch_width_independent(n: u32) {
        let narrow = is_prime(n).unwrap();
        prop_assert_eq!(is_prime(n as u64).unwrap(), narrow);
        prop_assert_eq!(is_prime(n as u128).unwrap(), narrow);
        prop_assert_eq!(is_prime(Candidate::Big(Integer::from(n))).unwrap(), narrow);
    }

    #[test]
    fn prop_dispatch_idempotent(n: u64) {
        let first = is_prime_u64(n);
        prop_assert_eq!(is_prime_u64(n), first);
        prop_assert_eq!(is_prime(n).unwrap(), first);
    }

    /// A product of two integers > 1 is never reported prime.
    #[test]
    fn prop_products_are_composite(a in 2u64..(1 << 32), b in 2u64..(1 << 32)) {
        prop_assert!(!is_prime_u64(a * b));
    }

    #[test]
    fn prop_big_products_are_composite(a in 2u64..(1 << 60), b in 2u64..(1 << 20)) {
        let n = Integer::from(a) * Integer::from(b);
        prop_assert!(!is_prime(n).unwrap());
    }
}
