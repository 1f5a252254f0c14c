//! Distributed fitness evaluation for a generational genetic algorithm.
//!
//! A master owns the population and drives evolution; fitness is delegated to
//! an external evaluator over a line-based text protocol on any duplex byte
//! stream (pipe, subprocess stdio, socket).

pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use error::{EvodistError, Result};
