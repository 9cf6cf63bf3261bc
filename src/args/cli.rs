use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_positive_u64, parse_run_duration_arg,
};
use super::types::PositiveU64;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Distributed httperf coordinator - run one benchmark on many workers and reduce their reports into a cluster summary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (sets log level to debug unless overridden by SWARMPERF_LOG/RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./swarmperf.toml or ./swarmperf.json if present.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env, global = true)]
    pub no_color: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Serve benchmark calls from a controller by running httperf locally
    Agent(AgentArgs),
    /// Run one benchmark on every worker and aggregate the reports
    Controller(ControllerArgs),
    /// Parse a saved httperf report and print its metrics
    Parse(ParseArgs),
    /// Re-aggregate rows from a per-record export
    Aggregate(AggregateArgs),
}

#[derive(Debug, Args, Clone)]
pub struct AgentArgs {
    /// Address to accept controller connections on
    #[arg(long, default_value = "0.0.0.0:9700")]
    pub listen: String,

    /// Tool name looked up in PATH, or a path to the binary
    #[arg(long, default_value = "httperf")]
    pub tool: String,

    /// Kill the tool if it runs longer than this (supports ms/s/m/h)
    #[arg(long = "tool-timeout", default_value = "10m", value_parser = parse_duration_arg)]
    pub tool_timeout: Duration,
}

#[derive(Debug, Args, Clone)]
pub struct ControllerArgs {
    /// Worker agent address (repeatable)
    #[arg(long = "worker", short = 'w')]
    pub workers: Vec<String>,

    /// Target host every worker benchmarks
    #[arg(long)]
    pub host: Option<String>,

    /// Target port
    #[arg(long, default_value_t = 80)]
    pub port: u16,

    /// Request path
    #[arg(long, default_value = "/")]
    pub uri: String,

    /// Connections opened by each worker
    #[arg(long, default_value = "100", value_parser = parse_positive_u64)]
    pub connections: PositiveU64,

    /// New connections per second on each worker
    #[arg(long, default_value = "10", value_parser = parse_positive_u64)]
    pub rate: PositiveU64,

    /// Requests sent per connection
    #[arg(long, default_value = "1", value_parser = parse_positive_u64)]
    pub calls: PositiveU64,

    /// Intended run duration (supports ms/s/m/h)
    #[arg(long, default_value = "10s", value_parser = parse_run_duration_arg)]
    pub duration: Duration,

    /// Append the run's summary line to this file
    #[arg(long = "summary-log")]
    pub summary_log: Option<PathBuf>,

    /// Append every worker record to this CSV file
    #[arg(long)]
    pub records: Option<PathBuf>,

    /// Warn when the cluster reports at least this many errors
    #[arg(long = "error-threshold")]
    pub error_threshold: Option<u64>,

    /// Give up on a worker that has not answered within this time (supports ms/s/m/h)
    #[arg(long = "call-timeout", value_parser = parse_duration_arg)]
    pub call_timeout: Option<Duration>,
}

#[derive(Debug, Args, Clone)]
pub struct ParseArgs {
    /// File holding one captured httperf report
    pub report: PathBuf,

    /// Print the record as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct AggregateArgs {
    /// Per-record CSV written by `controller --records`
    pub records: PathBuf,

    /// Run to aggregate (defaults to the last run in the file)
    #[arg(long = "run-id")]
    pub run_id: Option<String>,

    /// Append the summary line to this file
    #[arg(long = "summary-log")]
    pub summary_log: Option<PathBuf>,
}
