//! This module reimports commonly used types.

pub use crate::models::{Instance, Solution};

pub use crate::solver::search::MoveGenerators;
pub use crate::solver::{CoreOptimization, Parameters};

pub use crate::utils::DefaultRandom;
pub use crate::utils::Environment;
pub use crate::utils::GenericError;
pub use crate::utils::GenericResult;
pub use crate::utils::InfoLogger;
pub use crate::utils::Timer;
