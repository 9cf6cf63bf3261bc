use crate::error::{AggregateError, AppError, AppResult};
use crate::report::{METRIC_COUNT, Metric, MetricValues, PerformanceRecord, Reduction};

use super::summary::ClusterSummary;

/// Folds worker records into a cluster summary.
///
/// # Errors
///
/// Returns [`AggregateError::NoData`] when `records` is empty.
pub fn aggregate(records: &[PerformanceRecord]) -> AppResult<ClusterSummary> {
    aggregate_values(records.iter().map(|record| &record.metrics))
}

/// Folds raw metric rows, e.g. read back from an exported records file.
///
/// # Errors
///
/// Returns [`AggregateError::RecordLength`] for a row that does not hold
/// exactly one value per metric, or [`AggregateError::NoData`] when `rows`
/// is empty.
pub fn aggregate_rows(rows: Vec<Vec<f64>>) -> AppResult<ClusterSummary> {
    let values = rows
        .into_iter()
        .map(MetricValues::try_from)
        .collect::<AppResult<Vec<_>>>()?;
    aggregate_values(&values)
}

/// The accumulator starts as the first row verbatim. `avg` positions are
/// summed during the fold and divided by the worker count once at the end.
///
/// # Errors
///
/// Returns [`AggregateError::NoData`] when `rows` yields nothing.
pub fn aggregate_values<'row, I>(rows: I) -> AppResult<ClusterSummary>
where
    I: IntoIterator<Item = &'row MetricValues>,
{
    let mut rows = rows.into_iter();
    let first = rows
        .next()
        .ok_or_else(|| AppError::aggregate(AggregateError::NoData))?;

    let mut accumulator = *first.as_array();
    let mut workers = 1usize;
    for row in rows {
        fold_row(&mut accumulator, row);
        workers = workers.saturating_add(1);
    }
    normalize_averages(&mut accumulator, workers);

    Ok(ClusterSummary {
        workers,
        values: MetricValues::new(accumulator),
    })
}

fn fold_row(accumulator: &mut [f64; METRIC_COUNT], row: &MetricValues) {
    for ((slot, metric), value) in accumulator
        .iter_mut()
        .zip(Metric::ALL)
        .zip(row.as_array().iter().copied())
    {
        *slot = combine(metric.reduction(), *slot, value);
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "Sum and avg metrics are accumulated as floating point values."
)]
fn combine(reduction: Reduction, current: f64, value: f64) -> f64 {
    match reduction {
        Reduction::Sum | Reduction::Avg => current + value,
        Reduction::Min => current.min(value),
        Reduction::Max => current.max(value),
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "Averages are a single division by the worker count."
)]
fn normalize_averages(accumulator: &mut [f64; METRIC_COUNT], workers: usize) {
    let divisor = f64::from(u32::try_from(workers).unwrap_or(u32::MAX));
    for (slot, metric) in accumulator.iter_mut().zip(Metric::ALL) {
        if metric.reduction() == Reduction::Avg {
            *slot /= divisor;
        }
    }
}
