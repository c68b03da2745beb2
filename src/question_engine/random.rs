//! Deterministic random source.
//!
//! Every generator draws all of its randomness from one [`Random`] built from
//! the seed string. The sequence must never change for a given seed, so the
//! pieces are chosen for value stability:
//!
//! - the seed string is folded with 64-bit FNV-1a into a `u64`,
//! - that `u64` seeds a `ChaCha8Rng` (portable, fixed output per seed),
//! - range reduction is done here with rejection sampling on raw `next_u64`
//!   output instead of `rand`'s distributions, whose algorithms may change
//!   between releases.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::question_engine::error::GenerationError;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Fold a seed string into 64 bits. The empty string is a valid seed.
fn fold_seed(seed: &str) -> u64 {
    seed.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Seeded pseudo-random stream shared by all generators and oracles.
pub struct Random {
    rng: ChaCha8Rng,
}

impl Random {
    pub fn new(seed: &str) -> Self {
        Random { rng: ChaCha8Rng::seed_from_u64(fold_seed(seed)) }
    }

    /// Uniform integer in `min..=max`.
    ///
    /// Panics if `min > max`.
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "empty range {min}..={max}");
        let span = (i128::from(max) - i128::from(min) + 1) as u128;
        if span > u128::from(u64::MAX) {
            // Full i64 range: every 64-bit value maps to exactly one integer.
            return self.rng.next_u64() as i64;
        }
        let span = span as u64;
        let threshold = u64::MAX - (u64::MAX % span);
        loop {
            let value = self.rng.next_u64();
            if value < threshold {
                return (i128::from(min) + i128::from(value % span)) as i64;
            }
        }
    }

    /// Uniform index in `0..len`.
    fn index(&mut self, len: usize) -> usize {
        self.int(0, len as i64 - 1) as usize
    }

    /// Uniformly pick one element. Panics on an empty slice.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "choice from an empty slice");
        &items[self.index(items.len())]
    }

    /// Uniform `k`-combination without replacement.
    ///
    /// Runs the first `k` steps of a Fisher-Yates shuffle, so the returned
    /// order carries no meaning. Panics if `k > items.len()`.
    pub fn subset<T: Clone>(&mut self, items: &[T], k: usize) -> Vec<T> {
        assert!(k <= items.len(), "subset of {k} from {} items", items.len());
        let mut pool = items.to_vec();
        let n = pool.len();
        for i in 0..k {
            let j = i + self.index(n - i);
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }

    /// Draw candidates until `accept` holds, at most `limit` times.
    ///
    /// Exhaustion is reported as [`GenerationError::RedrawsExhausted`] so a
    /// pathological range fails the generation instead of looping forever.
    pub fn redraw<T>(
        &mut self,
        what: &'static str,
        limit: usize,
        mut draw: impl FnMut(&mut Random) -> T,
        mut accept: impl FnMut(&T) -> bool,
    ) -> Result<T, GenerationError> {
        for attempt in 1..=limit {
            let candidate = draw(self);
            if accept(&candidate) {
                return Ok(candidate);
            }
            trace!(what, attempt, "candidate rejected, drawing again");
        }
        Err(GenerationError::RedrawsExhausted { what, attempts: limit })
    }
}
