//! # Arith — Modular Multiplication Kernels and the Witness Loop
//!
//! Every fixed-width tier is built from the same three pieces:
//!
//! 1. A [`MulMod`] strategy giving an exact `(a·b) mod m` for its width.
//! 2. [`MulMod::pow_mod`], binary exponentiation on top of that product.
//! 3. [`strong_probable_prime`], the Miller–Rabin witness loop.
//!
//! ## Strategies
//!
//! | Strategy       | Operands | Accumulator | Valid for                     |
//! |----------------|----------|-------------|-------------------------------|
//! | [`Widening32`] | `u32`    | `u64`       | every `u32` modulus           |
//! | [`Narrow64`]   | `u64`    | `u64`       | m < [`NARROW64_SAFE_LIMIT`]   |
//! | [`Wide128`]    | `u64`    | `u128`      | every `u64` modulus           |
//!
//! `Narrow64` looks unsafe: it squares a residue in a 64-bit accumulator with no
//! widening. Below 3,037,001,057 every residue is small enough that the square
//! stays under 2^63, so the plain `(b*b) % m` is exact. The limit was found by
//! exhaustive search; it is a documented constant and nearby values are not
//! assumed to share its safety margin.
//!
//! `Wide128` uses the native `u128` product followed by a 128-by-64 remainder,
//! which is bit-identical to the manual high/low split a narrower host would
//! need.
//!
//! ## Decomposition
//!
//! For odd n, n−1 = 2^k · m with m odd. [`decompose`] recomputes it on every
//! call; nothing is cached.

use std::fmt;

/// First modulus at which the naive squaring in [`Narrow64`] can overflow a
/// signed 64-bit accumulator.
pub const NARROW64_SAFE_LIMIT: u64 = 3_037_001_057;

/// Unsigned machine word usable as an operand of a [`MulMod`] strategy.
pub trait Word: Copy + Eq + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static {
    const ZERO: Self;
    const ONE: Self;

    fn is_odd(self) -> bool;
    fn rem(self, m: Self) -> Self;
    fn shr(self, k: u32) -> Self;
    fn trailing_zeros(self) -> u32;
    fn pred(self) -> Self;
}

macro_rules! impl_word {
    ($t:ty) => {
        impl Word for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn is_odd(self) -> bool {
                self & 1 == 1
            }
            #[inline]
            fn rem(self, m: Self) -> Self {
                self % m
            }
            #[inline]
            fn shr(self, k: u32) -> Self {
                self >> k
            }
            #[inline]
            fn trailing_zeros(self) -> u32 {
                <$t>::trailing_zeros(self)
            }
            #[inline]
            fn pred(self) -> Self {
                self - 1
            }
        }
    };
}

impl_word!(u32);
impl_word!(u64);

/// An exact modular multiplication for one operand width.
pub trait MulMod {
    type Word: Word;

    /// `(a * b) mod m` for `0 <= a, b < m`, `m > 0`, without intermediate overflow.
    fn mul_mod(a: Self::Word, b: Self::Word, m: Self::Word) -> Self::Word;

    /// `base^exp mod m` by right-to-left binary exponentiation.
    ///
    /// `exp == 0` yields 1 (reduced mod m); `m == 1` yields 0.
    fn pow_mod(base: Self::Word, mut exp: Self::Word, m: Self::Word) -> Self::Word {
        let one = <Self::Word as Word>::ONE;
        let zero = <Self::Word as Word>::ZERO;
        if m == one {
            return zero;
        }
        let mut result = one;
        let mut b = base.rem(m);
        while exp != zero {
            if exp.is_odd() {
                result = Self::mul_mod(result, b, m);
            }
            exp = exp.shr(1);
            if exp != zero {
                b = Self::mul_mod(b, b, m);
            }
        }
        result
    }
}

/// 32-bit operands multiplied in a 64-bit accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Widening32;

impl MulMod for Widening32 {
    type Word = u32;

    #[inline]
    fn mul_mod(a: u32, b: u32, m: u32) -> u32 {
        (a as u64 * b as u64 % m as u64) as u32
    }
}

/// Naive 64-bit product, exact only for moduli below [`NARROW64_SAFE_LIMIT`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Narrow64;

impl MulMod for Narrow64 {
    type Word = u64;

    #[inline]
    fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
        debug_assert!(m < NARROW64_SAFE_LIMIT, "Narrow64 used with modulus {}", m);
        a * b % m
    }
}

/// Full double-width product via `u128`, exact for every `u64` modulus.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wide128;

impl MulMod for Wide128 {
    type Word = u64;

    #[inline]
    fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
        (a as u128 * b as u128 % m as u128) as u64
    }
}

/// Exact `(a * b) mod m` over the whole `u64` domain.
#[inline]
pub fn mul_mod_u64(a: u64, b: u64, m: u64) -> u64 {
    Wide128::mul_mod(a % m, b % m, m)
}

/// Exact `base^exp mod m` over the whole `u64` domain.
#[inline]
pub fn pow_mod_u64(base: u64, exp: u64, m: u64) -> u64 {
    Wide128::pow_mod(base, exp, m)
}

/// Split n−1 into `(k, m)` with n−1 = 2^k · m and m odd.
///
/// For n ≤ 1 there is no such split; `(0, 0)` is returned.
#[inline]
pub fn decompose<W: Word>(n: W) -> (u32, W) {
    if n <= W::ONE {
        return (0, W::ZERO);
    }
    let n1 = n.pred();
    let k = n1.trailing_zeros();
    (k, n1.shr(k))
}

/// One Miller–Rabin round: does witness `a` fail to prove odd `n` composite?
///
/// `(k, m)` must come from [`decompose`]. Computes b = a^m mod n and accepts if
/// b is 1 or n−1; otherwise squares up to k−1 more times, accepting on n−1 and
/// rejecting on 1 or on exhaustion.
pub fn strong_probable_prime<S: MulMod>(a: S::Word, m: S::Word, n: S::Word, k: u32) -> bool {
    let one = <S::Word as Word>::ONE;
    let n1 = n.pred();

    let mut b = S::pow_mod(a, m, n);
    if b == one || b == n1 {
        return true;
    }

    for _ in 1..k {
        b = S::mul_mod(b, b, n);
        if b == n1 {
            return true;
        }
        if b == one {
            return false;
        }
    }
    false
}
