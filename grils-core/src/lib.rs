//! A core crate with the building blocks of a granular iterated local search
//! solver for the [`Capacitated Vehicle Routing Problem`](https://en.wikipedia.org/wiki/Vehicle_routing_problem).
//!
//! # Key points
//!
//! The crate is organized around three tightly coupled subsystems:
//!
//! - [`models`] contains the immutable problem definition ([`models::Instance`])
//!   and the mutable [`models::Solution`]: routes stored as doubly linked lists
//!   of vertex indices with constant-time edge edits, lazily maintained
//!   cumulative loads, and a journal of applied actions which makes
//!   accept/rollback decisions cheap.
//! - [`solver::search`] contains the move-generator store (a sparsified
//!   catalog of candidate edges with cached improvement deltas kept in a
//!   binary heap) and the local search neighborhoods driven by it.
//! - [`solver`] wires everything into the outer optimization loop: ruin and
//!   recreate shaking, randomized variable neighborhood descent, simulated
//!   annealing acceptance, and per-vertex adaptation of the sparsification
//!   and shaking intensities.
//!
//! Supporting functionality lives in [`construction`] (savings heuristic and
//! a bin packing bound used to estimate the minimum route count) and in
//! [`algorithms`] (generic data structures reused across the crate).
//!
//! The whole engine is single threaded and deterministic: given the same
//! instance, parameters and seed it always produces the same solution. All
//! randomness flows through a single explicitly passed generator, see
//! [`utils::DefaultRandom`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod algorithms;
pub mod construction;
pub mod models;
pub mod solver;
pub mod utils;

pub mod prelude;
