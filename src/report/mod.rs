//! Decoding of `httperf` reports into typed performance records.
//!
//! The report is matched as one block against a fixed pattern whose numeric
//! capture groups are named after the entries of [`Metric::ALL`]; the metric
//! table is the single source for names, positions and reduction kinds.
mod metric;
mod parse;
mod pattern;
mod record;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
mod tests;

pub use metric::{CLIENT_ERROR_METRICS, METRIC_COUNT, Metric, Reduction};
pub use parse::{ParsedReport, parse_metrics, parse_report};
pub use pattern::{NET_IO_BPS, NET_IO_UNIT};
pub use record::{MetricValues, PerformanceRecord};
