use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{AgentArgs, Cli, Command, ControllerArgs, PositiveU64};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{AgentConfig, ConfigFile, ControllerConfig, TargetConfig};

/// Applies configuration values wherever the flag was not given explicitly.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(cli: &mut Cli, matches: &ArgMatches, config: &ConfigFile) -> AppResult<()> {
    match &mut cli.command {
        Command::Agent(args) => {
            if let (Some(section), Some(sub)) =
                (config.agent.as_ref(), matches.subcommand_matches("agent"))
            {
                apply_agent(args, sub, section)?;
            }
        }
        Command::Controller(args) => {
            if let (Some(section), Some(sub)) = (
                config.controller.as_ref(),
                matches.subcommand_matches("controller"),
            ) {
                apply_controller(args, sub, section)?;
            }
        }
        Command::Parse(_) | Command::Aggregate(_) => {}
    }
    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn apply_agent(args: &mut AgentArgs, matches: &ArgMatches, config: &AgentConfig) -> AppResult<()> {
    if !is_cli(matches, "listen")
        && let Some(listen) = config.listen.clone()
    {
        args.listen = listen;
    }
    if !is_cli(matches, "tool")
        && let Some(tool) = config.tool.clone()
    {
        args.tool = tool;
    }
    if !is_cli(matches, "tool_timeout")
        && let Some(timeout) = config.tool_timeout.as_ref()
    {
        args.tool_timeout = timeout.to_duration("agent.tool_timeout")?;
    }
    Ok(())
}

fn apply_controller(
    args: &mut ControllerArgs,
    matches: &ArgMatches,
    config: &ControllerConfig,
) -> AppResult<()> {
    if !is_cli(matches, "workers")
        && let Some(workers) = config.workers.clone()
    {
        args.workers = workers;
    }
    if !is_cli(matches, "summary_log")
        && let Some(path) = config.summary_log.as_ref()
    {
        args.summary_log = Some(PathBuf::from(path));
    }
    if !is_cli(matches, "records")
        && let Some(path) = config.records.as_ref()
    {
        args.records = Some(PathBuf::from(path));
    }
    if !is_cli(matches, "error_threshold")
        && let Some(threshold) = config.error_threshold
    {
        args.error_threshold = Some(threshold);
    }
    if !is_cli(matches, "call_timeout")
        && let Some(timeout) = config.call_timeout.as_ref()
    {
        args.call_timeout = Some(timeout.to_duration("controller.call_timeout")?);
    }
    if let Some(target) = config.target.as_ref() {
        apply_target(args, matches, target)?;
    }
    Ok(())
}

fn apply_target(
    args: &mut ControllerArgs,
    matches: &ArgMatches,
    config: &TargetConfig,
) -> AppResult<()> {
    if !is_cli(matches, "host")
        && let Some(host) = config.host.clone()
    {
        args.host = Some(host);
    }
    if !is_cli(matches, "port")
        && let Some(port) = config.port
    {
        args.port = port;
    }
    if !is_cli(matches, "uri")
        && let Some(uri) = config.uri.clone()
    {
        args.uri = uri;
    }
    if !is_cli(matches, "connections")
        && let Some(connections) = config.connections
    {
        args.connections = ensure_positive_u64(connections, "connections")?;
    }
    if !is_cli(matches, "rate")
        && let Some(rate) = config.rate
    {
        args.rate = ensure_positive_u64(rate, "rate")?;
    }
    if !is_cli(matches, "calls")
        && let Some(calls) = config.calls
    {
        args.calls = ensure_positive_u64(calls, "calls")?;
    }
    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration.as_ref()
    {
        args.duration = duration.to_run_duration("controller.target.duration")?;
    }
    Ok(())
}
