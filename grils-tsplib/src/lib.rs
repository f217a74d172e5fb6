//! This crate provides readers and writers for TSPLIB-style CVRP instances
//! of the "X" benchmark flavor, plus the solution and score writers used by
//! the command line interface.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod reader;
pub use self::reader::{read_instance, read_instance_from_path};

mod writer;
pub use self::writer::{write_score, write_solution};
