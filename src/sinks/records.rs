use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, info};

use crate::error::{AggregateError, AppError, AppResult, SinkError};
use crate::report::{METRIC_COUNT, Metric, PerformanceRecord};

use super::append::AppendLog;

const LEADING_COLUMNS: [&str; 9] = [
    "run_id",
    "timestamp_ms",
    "host",
    "port",
    "uri",
    "connections",
    "connection_rate",
    "calls_per_connection",
    "duration",
];
const TRAILING_COLUMNS: [&str; 2] = [crate::report::NET_IO_UNIT, crate::report::NET_IO_BPS];

/// Header line of the per-record export.
#[must_use]
pub fn record_header() -> String {
    LEADING_COLUMNS
        .iter()
        .copied()
        .chain(Metric::ALL.iter().map(|metric| metric.name()))
        .chain(TRAILING_COLUMNS)
        .collect::<Vec<_>>()
        .join(",")
}

/// One export row for one worker's record, quoted where needed.
///
/// # Errors
///
/// Returns an error when the row cannot be encoded.
pub fn record_row(record: &PerformanceRecord) -> AppResult<String> {
    let request = &record.request;
    let mut fields = vec![
        record.run.run_id.clone(),
        record.run.timestamp_ms.to_string(),
        request.host.clone(),
        request.port.to_string(),
        request.uri.clone(),
        request.connections.to_string(),
        request.connection_rate.to_string(),
        request.calls_per_connection.to_string(),
        request.duration_secs.to_string(),
    ];
    fields.extend(record.metrics.iter().map(|(_, value)| value.to_string()));
    fields.push(record.net_io_unit.clone());
    fields.push(record.net_io_bps.clone());

    let encode_error = |err| AppError::sink(SinkError::EncodeRow { source: err });
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(&fields).map_err(encode_error)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| encode_error(csv::Error::from(err.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes)
        .trim_end_matches(['\n', '\r'])
        .to_owned())
}

/// Encodes every record into an export row.
///
/// # Errors
///
/// Returns an error when any row cannot be encoded.
pub fn record_rows(records: &[PerformanceRecord]) -> AppResult<Vec<String>> {
    records.iter().map(record_row).collect()
}

/// CSV export of every worker record, header written once per file.
#[derive(Debug, Clone)]
pub struct RecordsExport {
    log: AppendLog,
}

impl RecordsExport {
    #[must_use]
    pub fn spawn(path: PathBuf) -> Self {
        Self {
            log: AppendLog::spawn(path, Some(record_header())),
        }
    }

    #[cfg(test)]
    /// Appends the rows of `records` in one write.
    ///
    /// # Errors
    ///
    /// Returns an error when a row cannot be encoded or the write fails.
    pub async fn append_all(&self, records: &[PerformanceRecord]) -> AppResult<()> {
        self.append_rows(record_rows(records)?).await
    }

    /// Appends rows already produced by [`record_rows`] in one write.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub async fn append_rows(&self, rows: Vec<String>) -> AppResult<()> {
        let count = rows.len();
        self.log.append_lines(rows).await?;
        info!("{} record(s) appended to {}", count, self.log.path().display());
        Ok(())
    }
}

/// Reads the metric columns of exported rows back for re-aggregation.
///
/// Only rows of `run_id` are returned; without a run id the rows of the last
/// run in the file are used.
///
/// # Errors
///
/// Returns an error when the file cannot be read, a row is malformed, it
/// holds no rows, or `run_id` does not occur.
pub async fn read_record_rows(path: &Path, run_id: Option<&str>) -> AppResult<Vec<Vec<f64>>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|err| {
        AppError::sink(SinkError::Read {
            path: path.to_path_buf(),
            source: err,
        })
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut rows: Vec<(String, Vec<f64>)> = Vec::new();
    for entry in reader.records() {
        let record = entry.map_err(|err| {
            AppError::sink(SinkError::DecodeRows {
                path: path.to_path_buf(),
                source: err,
            })
        })?;
        if record.get(0) == LEADING_COLUMNS.first().copied() {
            check_header(&record)?;
            continue;
        }
        let line = record
            .position()
            .map_or(0, |position| usize::try_from(position.line()).unwrap_or(usize::MAX));
        rows.push(parse_row(line, &record)?);
    }
    debug!("Read {} row(s) from {}", rows.len(), path.display());

    let selected = match run_id {
        Some(run_id) => run_id.to_owned(),
        None => rows
            .last()
            .map(|(run_id, _)| run_id.clone())
            .ok_or_else(|| AppError::aggregate(AggregateError::NoData))?,
    };

    let values: Vec<Vec<f64>> = rows
        .into_iter()
        .filter(|(row_run, _)| *row_run == selected)
        .map(|(_, values)| values)
        .collect();
    if values.is_empty() {
        return Err(AppError::aggregate(AggregateError::UnknownRun {
            run_id: selected,
        }));
    }
    Ok(values)
}

fn check_header(header: &StringRecord) -> AppResult<()> {
    let misplaced = header
        .iter()
        .skip(LEADING_COLUMNS.len())
        .zip(Metric::ALL)
        .find(|(column, metric)| Metric::from_name(column) != Some(*metric));
    misplaced.map_or(Ok(()), |(column, _)| {
        Err(AppError::aggregate(AggregateError::HeaderMismatch {
            column: column.to_owned(),
        }))
    })
}

fn parse_row(line: usize, row: &StringRecord) -> AppResult<(String, Vec<f64>)> {
    let expected = LEADING_COLUMNS
        .len()
        .saturating_add(METRIC_COUNT)
        .saturating_add(TRAILING_COLUMNS.len());
    if row.len() != expected {
        return Err(AppError::aggregate(AggregateError::RecordLength {
            expected: METRIC_COUNT,
            actual: row
                .len()
                .saturating_sub(LEADING_COLUMNS.len())
                .saturating_sub(TRAILING_COLUMNS.len()),
        }));
    }

    let run_id = row.get(0).unwrap_or_default().to_owned();
    let values = row
        .iter()
        .skip(LEADING_COLUMNS.len())
        .zip(Metric::ALL)
        .map(|(field, metric)| {
            field.trim().parse::<f64>().map_err(|err| {
                AppError::aggregate(AggregateError::RecordValue {
                    line,
                    name: metric.name(),
                    source: err,
                })
            })
        })
        .collect::<AppResult<Vec<f64>>>()?;
    Ok((run_id, values))
}
