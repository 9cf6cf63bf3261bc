//! Process boundary around the external load generator.
//!
//! One call spawns exactly one tool process, drains stdout and stderr
//! concurrently to EOF, and waits for it to exit.
mod argv;
mod locate;
mod runner;


pub use runner::{BenchmarkPort, HttperfPort};

#[cfg(test)]
use argv::build_args;
#[cfg(test)]
use runner::run_tool;
