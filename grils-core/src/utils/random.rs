#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use rand::prelude::*;
use rand::rngs::SmallRng;
use std::cell::RefCell;

/// Provides the way to use randomized values in a generic way.
///
/// A single instance wraps the one and only random stream of a solver run.
/// Every consumer (operator shuffling, ruin walks, acceptance draws) pulls
/// from it in a fixed sequence, which makes runs reproducible per seed.
pub struct DefaultRandom {
    rng: RefCell<SmallRng>,
}

impl DefaultRandom {
    /// Creates a new instance of `DefaultRandom` seeded with the given value.
    pub fn new(seed: u64) -> Self {
        Self { rng: RefCell::new(SmallRng::seed_from_u64(seed)) }
    }

    /// Produces an integral random value, uniformly distributed on the closed interval [min, max].
    pub fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min == max {
            return min;
        }

        assert!(min < max);
        self.rng.borrow_mut().gen_range(min..=max)
    }

    /// Produces a real random value, uniformly distributed on the interval [min, max).
    pub fn uniform_real(&self, min: f64, max: f64) -> f64 {
        if (min - max).abs() < f64::EPSILON {
            return min;
        }

        assert!(min < max);
        self.rng.borrow_mut().gen_range(min..max)
    }

    /// Flips a coin and returns true if it is "heads", false otherwise.
    pub fn is_head_not_tails(&self) -> bool {
        self.rng.borrow_mut().gen_bool(0.5)
    }

    /// Tests probability value in (0., 1.) range.
    pub fn is_hit(&self, probability: f64) -> bool {
        self.rng.borrow_mut().gen_bool(probability.clamp(0., 1.))
    }

    /// Shuffles the given slice in place.
    pub fn shuffle<T>(&self, slice: &mut [T]) {
        slice.shuffle(&mut *self.rng.borrow_mut());
    }
}
