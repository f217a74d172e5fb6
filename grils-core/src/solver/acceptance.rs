#[cfg(test)]
#[path = "../../tests/unit/solver/acceptance_test.rs"]
mod acceptance_test;

use crate::models::Solution;
use crate::utils::DefaultRandom;

/// Simulated annealing acceptance with a geometric cooling schedule.
pub struct SimulatedAnnealing {
    temperature: f64,
    factor: f64,
}

impl SimulatedAnnealing {
    /// Creates a schedule going from the initial to the final temperature
    /// over the given number of steps.
    pub fn new(initial_temperature: f64, final_temperature: f64, period: usize) -> Self {
        Self {
            temperature: initial_temperature,
            factor: (final_temperature / initial_temperature).powf(1. / period as f64),
        }
    }

    /// Applies one cooling step.
    pub fn decrease_temperature(&mut self) {
        self.temperature *= self.factor;
    }

    /// Returns whether the neighbor should be accepted against the reference
    /// cost at the current temperature.
    pub fn accept(&self, reference_cost: f64, neighbor: &Solution, random: &DefaultRandom) -> bool {
        neighbor.cost() < reference_cost - self.temperature * random.uniform_real(0., 1.).ln()
    }

    /// Returns the current temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}
