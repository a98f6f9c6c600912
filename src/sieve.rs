//! # Sieve — Bit-Vector Prime Table
//!
//! Exact primality lookup for every n up to a fixed bound, used only as a
//! verification oracle. Built once per run and shared read-only between
//! workers.
//!
//! ## Layout
//!
//! Only odd numbers are stored: bit `i` stands for 2i + 1. A set bit means
//! prime. Bits are packed into `u64` words ([`BitSieve`]), so a 10^10 bound
//! costs 625 MB instead of the 10 GB a `Vec<bool>` would need.
//!
//! ## Algorithm
//!
//! Plain sieve of Eratosthenes over the odd numbers: for each surviving odd
//! p with p² ≤ limit, clear p², p² + 2p, p² + 4p, …
//! Complexity: O(n log log n) time, O(n/16) bytes.

use std::time::Instant;

use tracing::info;

/// Packed bit array.
///
/// Bit layout: bit `i` is stored in word `i / 64`, bit position `i % 64`.
pub struct BitSieve {
    words: Vec<u64>,
    len: usize,
}

impl BitSieve {
    /// Create a sieve of `len` bits, all set to 1.
    pub fn new_all_set(len: usize) -> Self {
        let num_words = len.div_ceil(64);
        let mut words = vec![u64::MAX; num_words];
        // Clear unused high bits in the last word
        let extra = num_words * 64 - len;
        if extra > 0 && num_words > 0 {
            words[num_words - 1] >>= extra;
        }
        BitSieve { words, len }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(
            index < self.len,
            "BitSieve index out of bounds: {} >= {}",
            index,
            self.len
        );
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    #[inline]
    pub fn clear(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.words[index / 64] &= !(1u64 << (index % 64));
    }

    /// Count set bits using hardware POPCNT.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Indices of all set bits in ascending order.
    pub fn iter_set_bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            let base = wi * 64;
            BitIter { word, base }
        })
    }
}

/// Iterator over set bits within a single u64 word.
struct BitIter {
    word: u64,
    base: usize,
}

impl Iterator for BitIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let tz = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1; // clear lowest set bit
        Some(self.base + tz)
    }
}

/// Primality table for every integer in `0..=limit`.
pub struct PrimeSieve {
    odd: BitSieve,
    limit: u64,
}

impl PrimeSieve {
    pub fn new(limit: u64) -> Self {
        let start = Instant::now();
        // Bit i <-> 2i + 1, for 2i + 1 <= limit.
        let len = (limit.saturating_add(1) / 2).max(1) as usize;
        let mut odd = BitSieve::new_all_set(len);
        // 1 is not prime.
        odd.clear(0);

        let mut p: u64 = 3;
        while p.saturating_mul(p) <= limit {
            if odd.get((p / 2) as usize) {
                let mut m = p * p;
                while m <= limit {
                    odd.clear((m / 2) as usize);
                    match m.checked_add(2 * p) {
                        Some(next) => m = next,
                        None => break,
                    }
                }
            }
            p += 2;
        }

        info!(
            limit,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "prime sieve built"
        );
        PrimeSieve { odd, limit }
    }

    /// Largest value the table covers (inclusive).
    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    #[inline]
    pub fn contains(&self, n: u64) -> bool {
        n <= self.limit
    }

    /// # Panics
    /// Panics (debug) if `n > limit`.
    #[inline]
    pub fn is_prime(&self, n: u64) -> bool {
        debug_assert!(self.contains(n), "{} beyond sieve limit {}", n, self.limit);
        if n % 2 == 0 {
            return n == 2;
        }
        self.odd.get((n / 2) as usize)
    }

    /// Number of primes in `0..=limit`.
    pub fn count_primes(&self) -> usize {
        let odd_primes = self.odd.count_ones();
        if self.limit >= 2 {
            odd_primes + 1
        } else {
            odd_primes
        }
    }

    /// All primes in `0..=limit`, ascending.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        let two = if self.limit >= 2 { Some(2u64) } else { None };
        two.into_iter().chain(
            self.odd
                .iter_set_bits()
                .map(|i| 2 * i as u64 + 1)
                .filter(move |&n| n <= self.limit),
        )
    }
}
