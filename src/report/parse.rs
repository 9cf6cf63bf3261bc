use serde::Serialize;
use tracing::debug;

use crate::domain::{BenchmarkRequest, RunMeta};
use crate::error::{AppError, AppResult, ReportError};

use super::metric::{METRIC_COUNT, Metric};
use super::pattern::{NET_IO_BPS, NET_IO_UNIT, report_pattern};
use super::record::{MetricValues, PerformanceRecord};

/// Report fields without run metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedReport {
    pub metrics: MetricValues,
    pub net_io_unit: String,
    pub net_io_bps: String,
}

/// Matches the whole report and converts every numeric capture.
///
/// # Errors
///
/// Returns [`ReportError::ShapeMismatch`] when the report does not match the
/// expected layout, or [`ReportError::Field`] for the first numeric capture
/// that is not a base-10 number.
pub fn parse_metrics(report: &str) -> AppResult<ParsedReport> {
    let pattern = report_pattern()?;
    let captures = pattern.captures(report).ok_or_else(|| {
        AppError::report(ReportError::ShapeMismatch {
            report: report.to_owned(),
        })
    })?;

    let mut values = [0.0_f64; METRIC_COUNT];
    for (slot, metric) in values.iter_mut().zip(Metric::ALL) {
        let name = metric.name();
        let text = captures
            .name(name)
            .ok_or_else(|| AppError::report(ReportError::MissingCapture { name }))?
            .as_str();
        *slot = text.parse::<f64>().map_err(|err| {
            AppError::report(ReportError::Field {
                position: metric.position(),
                name,
                source: err,
            })
        })?;
    }

    let net_io_unit = captures
        .name(NET_IO_UNIT)
        .ok_or_else(|| {
            AppError::report(ReportError::MissingCapture { name: NET_IO_UNIT })
        })?
        .as_str()
        .to_owned();
    let net_io_bps = captures
        .name(NET_IO_BPS)
        .ok_or_else(|| AppError::report(ReportError::MissingCapture { name: NET_IO_BPS }))?
        .as_str()
        .to_owned();

    Ok(ParsedReport {
        metrics: MetricValues::new(values),
        net_io_unit,
        net_io_bps,
    })
}

/// Parses one worker's report and stamps it with the run it belongs to.
///
/// # Errors
///
/// Propagates the errors of [`parse_metrics`].
pub fn parse_report(
    report: &str,
    run: RunMeta,
    request: BenchmarkRequest,
) -> AppResult<PerformanceRecord> {
    let parsed = parse_metrics(report)?;
    debug!(
        "Parsed report for run {} ({} bytes, {} replies)",
        run.run_id,
        report.len(),
        parsed.metrics.get(Metric::TotalReplies)
    );
    Ok(PerformanceRecord {
        run,
        request,
        metrics: parsed.metrics,
        net_io_unit: parsed.net_io_unit,
        net_io_bps: parsed.net_io_bps,
        raw: report.to_owned(),
    })
}
