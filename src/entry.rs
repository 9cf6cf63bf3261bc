use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::info;

use crate::aggregate::aggregate_rows;
use crate::args::{AggregateArgs, Cli, Command, ControllerArgs, ParseArgs};
use crate::config::{DEFAULT_CONFIG_FILES, apply_config, load_config};
use crate::distributed::{AgentOptions, ControllerOptions, print_summary, print_worker_records};
use crate::domain::BenchmarkRequest;
use crate::error::{AppError, AppResult, ValidationError};
use crate::report::{Metric, ParsedReport, parse_metrics};
use crate::sinks::{SummaryLog, read_record_rows};

enum RunPlan {
    Agent(AgentOptions),
    Controller(ControllerOptions),
    Parse(ParseArgs),
    Aggregate(AggregateArgs),
}

pub(crate) fn run() -> AppResult<()> {
    let (cli, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(cli.verbose, cli.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(cli, &matches))
}

fn parse_args() -> AppResult<Option<(Cli, ArgMatches)>> {
    let mut cmd = Cli::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if matches!(raw_args.as_slice(), [] | [_]) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let cli = Cli::from_arg_matches(&matches)?;

    Ok(Some((cli, matches)))
}

async fn run_async(cli: Cli, matches: &ArgMatches) -> AppResult<()> {
    let plan = build_plan(cli, matches)?;
    execute_plan(plan).await
}

fn build_plan(mut cli: Cli, matches: &ArgMatches) -> AppResult<RunPlan> {
    if let Some(config) = load_config(cli.config.as_deref())? {
        if cli.config.is_none() {
            info!("Using config from {}", default_config_in_use());
        }
        apply_config(&mut cli, matches, &config)?;
    }

    match cli.command {
        Command::Agent(args) => Ok(RunPlan::Agent(AgentOptions {
            listen: args.listen,
            tool: args.tool,
            tool_timeout: args.tool_timeout,
        })),
        Command::Controller(args) => Ok(RunPlan::Controller(controller_options(args)?)),
        Command::Parse(args) => Ok(RunPlan::Parse(args)),
        Command::Aggregate(args) => Ok(RunPlan::Aggregate(args)),
    }
}

fn default_config_in_use() -> &'static str {
    DEFAULT_CONFIG_FILES
        .iter()
        .copied()
        .find(|path| Path::new(path).exists())
        .unwrap_or("default config")
}

fn controller_options(args: ControllerArgs) -> AppResult<ControllerOptions> {
    let host = args.host.ok_or_else(|| {
        tracing::error!("Missing target host (set --host or controller.target.host in config).");
        AppError::validation(ValidationError::MissingHost)
    })?;
    let request = BenchmarkRequest {
        host,
        port: args.port,
        uri: args.uri,
        connections: args.connections.get(),
        connection_rate: args.rate.get(),
        calls_per_connection: args.calls.get(),
        duration_secs: args.duration.as_secs(),
    };
    request.validate()?;
    Ok(ControllerOptions {
        workers: args.workers,
        request,
        summary_log: args.summary_log,
        records: args.records,
        error_threshold: args.error_threshold,
        call_timeout: args.call_timeout,
    })
}

async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::Agent(options) => crate::distributed::run_agent(options).await,
        RunPlan::Controller(options) => {
            let threshold = options.error_threshold;
            let workers = options.workers.clone();
            let outcome = crate::distributed::run_controller(options).await?;
            print_worker_records(&workers, &outcome.records);
            print_summary(Some(&outcome.run), &outcome.summary, threshold);
            Ok(())
        }
        RunPlan::Parse(args) => run_parse(&args).await,
        RunPlan::Aggregate(args) => run_aggregate(args).await,
    }
}

async fn run_parse(args: &ParseArgs) -> AppResult<()> {
    let report = tokio::fs::read_to_string(&args.report).await?;
    let parsed = parse_metrics(&report)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        print_parsed(&parsed);
    }
    Ok(())
}

fn print_parsed(parsed: &ParsedReport) {
    for (metric, value) in parsed.metrics.iter() {
        println!(
            "{:>2} {:<28} {:<3} {}",
            metric.position(),
            metric.name(),
            metric.reduction().as_str(),
            value
        );
    }
    println!("   {:<28}     {}", crate::report::NET_IO_UNIT, parsed.net_io_unit);
    println!("   {:<28}     {}", crate::report::NET_IO_BPS, parsed.net_io_bps);
    println!(
        "Total Errors: {}",
        parsed.metrics.get(Metric::ErrorsTotal)
    );
}

async fn run_aggregate(args: AggregateArgs) -> AppResult<()> {
    let rows = read_record_rows(&args.records, args.run_id.as_deref()).await?;
    let summary = aggregate_rows(rows)?;
    if let Some(path) = args.summary_log {
        SummaryLog::spawn(path).append(&summary).await?;
    }
    print_summary(None, &summary, None);
    Ok(())
}
