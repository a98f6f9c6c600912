//! # millrab — Deterministic Tiered Miller–Rabin
//!
//! Exact primality for every integer up to 3,317,044,064,679,887,385,961,980
//! with no probabilistic error: each tier runs strong probable-prime rounds
//! against a witness set that is proven sufficient for its range.
//!
//! | Tier | Domain | Arithmetic |
//! |------|--------|------------|
//! | [`Tier32`] | `u32` | `u64` widening product |
//! | [`Tier64Restricted`] | `u64 < 3,037,001,057` | native `u64` product |
//! | [`Tier64`] | `u64` | `u128` widening product |
//! | [`TierBig`] | `<= L` | `rug::Integer` |
//!
//! [`is_prime`] routes a candidate to the cheapest tier that covers it.
//! The [`exhaustive`] module brute-forces a tier against an independent
//! oracle over a range, on a fixed worker pool.

pub mod arith;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod exhaustive;
pub mod oracle;
pub mod progress;
pub mod sieve;
pub mod tier32;
pub mod tier64;
pub mod tier64_restricted;
pub mod tier_big;
pub mod witness;

pub use dispatch::{is_prime, is_prime_u64, select_tier, Candidate, TierKind};
pub use error::{PrimalityError, VerifyError};
pub use tier32::Tier32;
pub use tier64::Tier64;
pub use tier64_restricted::Tier64Restricted;
pub use tier_big::TierBig;
