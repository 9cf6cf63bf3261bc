//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::{AgentArgs, AggregateArgs, Cli, Command, ControllerArgs, ParseArgs};
pub use types::PositiveU64;

pub(crate) use parsers::{parse_duration, parse_run_duration};
