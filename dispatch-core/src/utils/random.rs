#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use crate::utils::Float;
use rand::prelude::*;
use std::cell::RefCell;

/// Provides the way to use randomized values in generic way.
pub trait Random {
    /// Produces integral random value, uniformly distributed on the half-open interval [0, len).
    fn uniform_index(&self, len: usize) -> usize;

    /// Produces real random value, uniformly distributed on the half-open interval [min, max).
    fn uniform_real(&self, min: Float, max: Float) -> Float;

    /// Returns an index picked with probability proportional to its weight. Negative and NaN
    /// weights are treated as zero. Returns `None` when there is no positive weight.
    fn weighted_index(&self, weights: &[Float]) -> Option<usize> {
        let is_positive = |weight: Float| weight > 0.;
        let total: Float = weights.iter().copied().filter(|&weight| is_positive(weight)).sum();

        if !is_positive(total) {
            return None;
        }

        let threshold = self.uniform_real(0., total);
        let mut cumulative = 0.;
        let mut last_positive = None;

        for (index, &weight) in weights.iter().enumerate().filter(|(_, weight)| is_positive(**weight)) {
            cumulative += weight;
            last_positive = Some(index);

            if cumulative > threshold {
                return Some(index);
            }
        }

        // accumulated rounding error can leave the threshold slightly above the running sum
        last_positive
    }
}

/// A random implementation backed by a seeded generator: two instances created with the same seed
/// produce the same sequence of values.
pub struct SeededRandom {
    rng: RefCell<SmallRng>,
}

impl SeededRandom {
    /// Creates a new instance of `SeededRandom` with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { rng: RefCell::new(SmallRng::seed_from_u64(seed)) }
    }
}

impl Random for SeededRandom {
    fn uniform_index(&self, len: usize) -> usize {
        assert!(len > 0);

        if len == 1 {
            return 0;
        }

        self.rng.borrow_mut().gen_range(0..len)
    }

    fn uniform_real(&self, min: Float, max: Float) -> Float {
        if (min - max).abs() < Float::EPSILON {
            return min;
        }

        assert!(min < max);
        self.rng.borrow_mut().gen_range(min..max)
    }
}
