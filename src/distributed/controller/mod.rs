mod call;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::aggregate::{ClusterSummary, aggregate};
use crate::domain::{BenchmarkRequest, ExecutionResult, RunMeta};
use crate::error::{AppError, AppResult, DistributedError};
use crate::report::{PerformanceRecord, parse_report};
use crate::sinks::{RecordsExport, SummaryLog, record_rows};

#[cfg(test)]
pub(super) use call::call_worker;
pub(crate) use output::{print_summary, print_worker_records};

/// Settings of the `controller` subcommand.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub workers: Vec<String>,
    pub request: BenchmarkRequest,
    pub summary_log: Option<PathBuf>,
    pub records: Option<PathBuf>,
    pub error_threshold: Option<u64>,
    pub call_timeout: Option<Duration>,
}

/// Everything one successful run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run: RunMeta,
    pub records: Vec<PerformanceRecord>,
    pub summary: ClusterSummary,
}

/// Runs one benchmark on every worker and reduces the reports.
///
/// Nothing is archived unless every worker returned a parsable report.
///
/// # Errors
///
/// Returns an error if no worker is configured, the request is invalid, any
/// worker call or report parse fails, or archiving fails.
pub async fn run_controller(options: ControllerOptions) -> AppResult<RunOutcome> {
    if options.workers.is_empty() {
        return Err(AppError::distributed(DistributedError::NoWorkers));
    }
    options.request.validate()?;

    let run = RunMeta::new();
    info!(
        "Run {} started at {} on {} worker(s)",
        run.run_id,
        run.started_at(),
        options.workers.len()
    );

    let results = call::call_all(&options.workers, &options.request, options.call_timeout).await?;
    let records = parse_all(results, &run, &options.request)?;
    let summary = aggregate(&records)?;

    // Rows are encoded before anything is written, then committed ahead of
    // the summary line: a summary line is never archived without its rows.
    let rows = options
        .records
        .as_ref()
        .map(|path| record_rows(&records).map(|rows| (path.clone(), rows)))
        .transpose()?;
    let summary_line = summary.to_line();
    if let Some((path, rows)) = rows {
        RecordsExport::spawn(path).append_rows(rows).await?;
    }
    if let Some(path) = options.summary_log.as_ref() {
        SummaryLog::spawn(path.clone()).append_line(summary_line).await?;
    }

    if summary.exceeds_error_threshold(options.error_threshold) {
        warn!(
            "Run {} reported {} errors, at or above the threshold",
            run.run_id,
            summary.total_errors()
        );
    }
    if summary.is_client_degraded() {
        warn!(
            "Run {} hit {} client-side errors; workers may have limited the load",
            run.run_id,
            summary.client_errors()
        );
    }

    Ok(RunOutcome {
        run,
        records,
        summary,
    })
}

fn parse_all(
    results: Vec<(String, ExecutionResult)>,
    run: &RunMeta,
    request: &BenchmarkRequest,
) -> AppResult<Vec<PerformanceRecord>> {
    results
        .into_iter()
        .map(|(worker, result)| {
            parse_report(&result.stdout, run.clone(), request.clone()).inspect_err(|err| {
                warn!("Report from {} could not be parsed: {}", worker, err);
            })
        })
        .collect()
}
