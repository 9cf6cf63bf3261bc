use std::collections::HashSet;

use crate::domain::{BenchmarkRequest, RunMeta};
use crate::error::{AppError, AppResult, ReportError};

use super::fixtures::{SAMPLE_REPORT, SAMPLE_VALUES, render_report, sample_with};
use super::pattern::{NET_IO_BPS, NET_IO_UNIT, report_pattern};
use super::{CLIENT_ERROR_METRICS, METRIC_COUNT, Metric, Reduction, parse_metrics, parse_report};

fn same(left: f64, right: f64) -> bool {
    left.to_bits() == right.to_bits()
}

fn request() -> BenchmarkRequest {
    BenchmarkRequest {
        host: "localhost".to_owned(),
        port: 8080,
        uri: "/".to_owned(),
        connections: 100,
        connection_rate: 10,
        calls_per_connection: 1,
        duration_secs: 10,
    }
}

fn expect_field_error(report: &str, position: usize, name: &str) -> AppResult<()> {
    match parse_metrics(report) {
        Err(AppError::Report(ReportError::Field {
            position: got_position,
            name: got_name,
            ..
        })) => {
            if got_position != position || got_name != name {
                return Err(AppError::report(format!(
                    "Expected field {} ({}), got {} ({})",
                    position, name, got_position, got_name
                )));
            }
            Ok(())
        }
        other => Err(AppError::report(format!(
            "Expected field error, got {:?}",
            other.map(|parsed| parsed.metrics)
        ))),
    }
}

#[test]
fn parses_every_field_in_table_order() -> AppResult<()> {
    let parsed = parse_metrics(SAMPLE_REPORT)?;
    for ((metric, value), expected) in parsed.metrics.iter().zip(SAMPLE_VALUES) {
        if !same(value, expected) {
            return Err(AppError::report(format!(
                "{} decoded as {}, expected {}",
                metric.name(),
                value,
                expected
            )));
        }
    }
    if parsed.net_io_unit != "KB/s" {
        return Err(AppError::report(format!(
            "Unexpected net io unit {:?}",
            parsed.net_io_unit
        )));
    }
    if parsed.net_io_bps != "0.1*10^6" {
        return Err(AppError::report(format!(
            "Unexpected net io bps {:?}",
            parsed.net_io_bps
        )));
    }
    Ok(())
}

#[test]
fn record_keeps_raw_report_byte_for_byte() -> AppResult<()> {
    let run = RunMeta::new();
    let record = parse_report(SAMPLE_REPORT, run.clone(), request())?;
    if record.raw.as_bytes() != SAMPLE_REPORT.as_bytes() {
        return Err(AppError::report("Raw report was altered"));
    }
    if record.run != run || record.request != request() {
        return Err(AppError::report("Run metadata was not echoed"));
    }
    if !same(record.get(Metric::TotalReplies), 100.0) {
        return Err(AppError::report("Unexpected total replies"));
    }
    Ok(())
}

#[test]
fn pattern_groups_follow_metric_table() -> AppResult<()> {
    let pattern = report_pattern()?;
    // Group 0 plus 49 numeric and 2 string groups.
    if pattern.captures_len() != METRIC_COUNT + 3 {
        return Err(AppError::report(format!(
            "Unexpected capture group count {}",
            pattern.captures_len()
        )));
    }
    let numeric: Vec<&str> = pattern
        .capture_names()
        .flatten()
        .filter(|name| *name != NET_IO_UNIT && *name != NET_IO_BPS)
        .collect();
    let table: Vec<&str> = Metric::ALL.iter().map(|metric| metric.name()).collect();
    if numeric != table {
        return Err(AppError::report(format!(
            "Pattern groups {:?} diverge from metric table {:?}",
            numeric, table
        )));
    }
    Ok(())
}

#[test]
fn metric_table_is_dense_and_unique() -> AppResult<()> {
    let mut names = HashSet::new();
    for (idx, metric) in Metric::ALL.iter().enumerate() {
        if metric.index() != idx {
            return Err(AppError::report(format!(
                "{} sits at {} but indexes {}",
                metric.name(),
                idx,
                metric.index()
            )));
        }
        if !names.insert(metric.name()) {
            return Err(AppError::report(format!(
                "Duplicate metric name {}",
                metric.name()
            )));
        }
        if Metric::from_name(metric.name()) != Some(*metric) {
            return Err(AppError::report(format!(
                "Lookup by name failed for {}",
                metric.name()
            )));
        }
    }
    if names.len() != METRIC_COUNT {
        return Err(AppError::report("Metric table is not 49 entries long"));
    }
    Ok(())
}

#[test]
fn reduction_kinds_match_metric_semantics() -> AppResult<()> {
    let expectations = [
        (Metric::TotalRequests, Reduction::Sum),
        (Metric::RequestRate, Reduction::Sum),
        (Metric::ConnectionTimeAvg, Reduction::Avg),
        (Metric::ReplyTimeResponse, Reduction::Avg),
        (Metric::ConnectionTimeMin, Reduction::Min),
        (Metric::ConnectionTimeMax, Reduction::Max),
        (Metric::ErrorsTotal, Reduction::Sum),
    ];
    for (metric, expected) in expectations {
        if metric.reduction() != expected {
            return Err(AppError::report(format!(
                "{} reduces by {}, expected {}",
                metric.name(),
                metric.reduction().as_str(),
                expected.as_str()
            )));
        }
    }
    if CLIENT_ERROR_METRICS
        .iter()
        .any(|metric| metric.reduction() != Reduction::Sum)
    {
        return Err(AppError::report("Client error counters must be summed"));
    }
    Ok(())
}

#[test]
fn missing_section_fails_whole_report() -> AppResult<()> {
    let truncated = SAMPLE_REPORT.replace("Request size [B]: 62.0\n", "");
    match parse_metrics(&truncated) {
        Err(AppError::Report(ReportError::ShapeMismatch { report })) => {
            if report != truncated {
                return Err(AppError::report("Mismatch error must carry whole input"));
            }
            Ok(())
        }
        other => Err(AppError::report(format!(
            "Expected shape mismatch, got {:?}",
            other.map(|parsed| parsed.metrics)
        ))),
    }
}

#[test]
fn empty_input_fails_whole_report() -> AppResult<()> {
    match parse_metrics("") {
        Err(AppError::Report(ReportError::ShapeMismatch { .. })) => Ok(()),
        other => Err(AppError::report(format!(
            "Expected shape mismatch, got {:?}",
            other.map(|parsed| parsed.metrics)
        ))),
    }
}

#[test]
fn non_numeric_value_reports_its_position() -> AppResult<()> {
    let corrupted = SAMPLE_REPORT.replacen("test-duration 9.902 s", "test-duration . s", 1);
    expect_field_error(&corrupted, 5, "test_duration")
}

#[test]
fn empty_value_reports_its_position() -> AppResult<()> {
    let corrupted = SAMPLE_REPORT.replacen(
        "Maximum connect burst length: 1\n",
        "Maximum connect burst length: \n",
        1,
    );
    expect_field_error(&corrupted, 1, "connect_burst_length")
}

#[test]
fn first_unparsable_field_wins() -> AppResult<()> {
    let corrupted = SAMPLE_REPORT
        .replacen("avg 0.7 max", "avg . max", 1)
        .replacen("header 214.0", "header .", 1);
    expect_field_error(&corrupted, 10, "connection_time_avg")
}

#[test]
fn last_error_line_is_position_49() -> AppResult<()> {
    let corrupted = SAMPLE_REPORT.replacen("ftab-full 0 other 0", "ftab-full 0 other ", 1);
    expect_field_error(&corrupted, 49, "errors_other")
}

#[test]
fn rendered_reports_decode_to_their_values() -> AppResult<()> {
    let values = sample_with(&[
        (Metric::TotalRequests, 1500.0),
        (Metric::ConnectionTimeAvg, 12.5),
        (Metric::ErrorsOther, 3.0),
    ]);
    let parsed = parse_metrics(&render_report(&values))?;
    if parsed.metrics != values {
        return Err(AppError::report(format!(
            "Rendered report decoded to {:?}",
            parsed.metrics
        )));
    }
    Ok(())
}
