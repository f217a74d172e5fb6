//! Builders and fixtures shared across unit tests.

#[macro_use]
pub mod macros;

pub mod models;
pub mod solver;
