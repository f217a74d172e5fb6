//! This module contains constructive heuristics and bounds used to produce
//! and size the initial solution.

mod bpp;
pub use self::bpp::first_fit_decreasing;

mod savings;
pub use self::savings::clarke_and_wright;
