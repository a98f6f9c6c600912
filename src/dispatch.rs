//! # Dispatch — Single Entry Point Across Tiers
//!
//! A candidate is classified once into a [`Candidate`] tag by magnitude, then
//! [`select_tier`] picks the cheapest tier able to decide it:
//!
//! | Magnitude                      | Tier                    |
//! |--------------------------------|-------------------------|
//! | n ≤ 2^31 − 1                   | [`Tier32`]              |
//! | n < 3,037,001,057              | [`Tier64Restricted`]    |
//! | n < 2^64                       | [`Tier64`]              |
//! | n ≤ L                          | [`TierBig`]             |
//! | beyond L                       | `UnsupportedRange`      |
//!
//! There is no implicit widening: a `u64` that happens to be small is routed
//! by value, not by type, and an `Integer` that fits in `u64` is normalised to
//! the native path.

use std::fmt;

use rug::Integer;

use crate::error::PrimalityError;
use crate::tier32::Tier32;
use crate::tier64::Tier64;
use crate::tier64_restricted::Tier64Restricted;
use crate::tier_big::TierBig;

/// A primality candidate tagged by semantic width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Narrow(u32),
    Wide(u64),
    Big(Integer),
}

impl From<u32> for Candidate {
    fn from(n: u32) -> Self {
        Candidate::Narrow(n)
    }
}

impl From<u64> for Candidate {
    fn from(n: u64) -> Self {
        match u32::try_from(n) {
            Ok(v) => Candidate::Narrow(v),
            Err(_) => Candidate::Wide(n),
        }
    }
}

impl From<u128> for Candidate {
    fn from(n: u128) -> Self {
        match u64::try_from(n) {
            Ok(v) => Candidate::from(v),
            Err(_) => Candidate::Big(Integer::from(n)),
        }
    }
}

impl From<&Integer> for Candidate {
    fn from(n: &Integer) -> Self {
        match n.to_u64() {
            Some(v) => Candidate::from(v),
            None => Candidate::Big(n.clone()),
        }
    }
}

impl From<Integer> for Candidate {
    fn from(n: Integer) -> Self {
        match n.to_u64() {
            Some(v) => Candidate::from(v),
            None => Candidate::Big(n),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Narrow(n) => write!(f, "{}", n),
            Candidate::Wide(n) => write!(f, "{}", n),
            Candidate::Big(n) => write!(f, "{}", n),
        }
    }
}

/// The four deciding tiers in ascending cost order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierKind {
    Tier32,
    Tier64Restricted,
    Tier64,
    TierBig,
}

impl TierKind {
    pub const ALL: [TierKind; 4] = [
        TierKind::Tier32,
        TierKind::Tier64Restricted,
        TierKind::Tier64,
        TierKind::TierBig,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TierKind::Tier32 => Tier32::NAME,
            TierKind::Tier64Restricted => Tier64Restricted::NAME,
            TierKind::Tier64 => Tier64::NAME,
            TierKind::TierBig => TierBig::NAME,
        }
    }

    /// Inclusive upper bound of the magnitudes the dispatcher routes here.
    pub fn dispatch_max(self) -> u128 {
        match self {
            TierKind::Tier32 => Tier32::ARG_LIMIT as u128,
            TierKind::Tier64Restricted => Tier64Restricted::ARG_LIMIT as u128 - 1,
            TierKind::Tier64 => u64::MAX as u128,
            TierKind::TierBig => TierBig::ARG_LIMIT,
        }
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the cheapest tier for a candidate.
pub fn select_tier(candidate: &Candidate) -> Result<TierKind, PrimalityError> {
    match candidate {
        Candidate::Narrow(n) => Ok(select_native(*n as u64)),
        Candidate::Wide(n) => Ok(select_native(*n)),
        Candidate::Big(n) => {
            if *n < 0u32 || *n <= TierBig::ARG_LIMIT {
                Ok(TierKind::TierBig)
            } else {
                Err(PrimalityError::unsupported(n, TierBig::ARG_LIMIT))
            }
        }
    }
}

fn select_native(n: u64) -> TierKind {
    if n <= Tier32::ARG_LIMIT as u64 {
        TierKind::Tier32
    } else if n < Tier64Restricted::ARG_LIMIT {
        TierKind::Tier64Restricted
    } else {
        TierKind::Tier64
    }
}

/// Decide primality of any supported candidate.
///
/// Never fails for n ≤ L; beyond L returns
/// [`PrimalityError::UnsupportedRange`].
pub fn is_prime(candidate: impl Into<Candidate>) -> Result<bool, PrimalityError> {
    match candidate.into() {
        Candidate::Narrow(n) => Ok(is_prime_u64(n as u64)),
        Candidate::Wide(n) => Ok(is_prime_u64(n)),
        Candidate::Big(n) => TierBig.is_prime(&n),
    }
}

/// Total primality test for any `u64`.
pub fn is_prime_u64(n: u64) -> bool {
    match select_native(n) {
        TierKind::Tier32 => Tier32.is_prime(n as u32),
        TierKind::Tier64Restricted => Tier64Restricted.is_prime_unchecked(n),
        _ => Tier64.is_prime(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_normalises_width() {
        assert_eq!(Candidate::from(5u64), Candidate::Narrow(5));
        assert_eq!(Candidate::from(1u64 << 40), Candidate::Wide(1 << 40));
        assert_eq!(Candidate::from(Integer::from(17)), Candidate::Narrow(17));
        assert!(matches!(Candidate::from(u128::MAX), Candidate::Big(_)));
        assert!(matches!(Candidate::from(Integer::from(-3)), Candidate::Big(_)));
    }

    #[test]
    fn routes_by_ascending_cost() {
        let sel = |n: u128| select_tier(&Candidate::from(n)).unwrap();
        assert_eq!(sel(0), TierKind::Tier32);
        assert_eq!(sel(2_147_483_647), TierKind::Tier32);
        assert_eq!(sel(2_147_483_648), TierKind::Tier64Restricted);
        assert_eq!(sel(3_037_001_056), TierKind::Tier64Restricted);
        assert_eq!(sel(3_037_001_057), TierKind::Tier64);
        assert_eq!(sel(u64::MAX as u128), TierKind::Tier64);
        assert_eq!(sel(u64::MAX as u128 + 1), TierKind::TierBig);
        assert_eq!(sel(TierBig::ARG_LIMIT), TierKind::TierBig);
        assert!(select_tier(&Candidate::from(TierBig::ARG_LIMIT + 1)).is_err());
    }

    #[test]
    fn concrete_scenarios() {
        assert_eq!(is_prime(0u32), Ok(false));
        assert_eq!(is_prime(1u32), Ok(false));
        assert_eq!(is_prime(2u32), Ok(true));
        assert_eq!(is_prime(3_215_031_751u64), Ok(false));
        assert_eq!(is_prime(3_037_001_041u64), Ok(false));
        assert_eq!(is_prime(174_440_041u64), Ok(true));
        assert_eq!(is_prime(4_952_019_383_323u64), Ok(true));
        assert_eq!(is_prime(Integer::from(-5)), Ok(false));
    }

    #[test]
    fn unsupported_beyond_l() {
        let beyond = Integer::from(TierBig::ARG_LIMIT) + 1u32;
        assert!(matches!(
            is_prime(beyond),
            Err(PrimalityError::UnsupportedRange { .. })
        ));
    }

    #[test]
    fn u64_entry_point_is_idempotent() {
        for &n in &[97u64, 2_147_483_659, 3_037_001_047, 18_446_744_073_709_551_557] {
            let first = is_prime_u64(n);
            assert!(first, "n = {}", n);
            assert_eq!(is_prime_u64(n), first);
            assert_eq!(is_prime(n), Ok(first));
        }
    }

    #[test]
    fn dispatch_max_is_contiguous() {
        for pair in TierKind::ALL.windows(2) {
            assert!(pair[0].dispatch_max() < pair[1].dispatch_max());
        }
    }
}
