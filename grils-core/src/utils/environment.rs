//! Contains environment specific logic.

use crate::utils::DefaultRandom;
use std::sync::Arc;

/// A logger type which is called with various information.
pub type InfoLogger = Arc<dyn Fn(&str)>;

/// Keeps track of environment specific information which influences algorithm behavior.
pub struct Environment {
    /// A wrapper on random generator.
    pub random: DefaultRandom,

    /// An information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment`.
    pub fn new(random: DefaultRandom, logger: InfoLogger) -> Self {
        Self { random, logger }
    }

    /// Creates an instance of `Environment` with the given seed and a noop logger.
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new(DefaultRandom::new(seed), Arc::new(|_| {}))
    }
}
