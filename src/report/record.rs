use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::domain::{BenchmarkRequest, RunMeta};
use crate::error::{AggregateError, AppError, AppResult};

use super::metric::{METRIC_COUNT, Metric};

/// The 49 numeric metrics of one report, indexed by [`Metric`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricValues([f64; METRIC_COUNT]);

impl MetricValues {
    #[must_use]
    pub const fn new(values: [f64; METRIC_COUNT]) -> Self {
        Self(values)
    }

    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "Metric discriminants are 0..METRIC_COUNT by construction."
    )]
    pub const fn get(&self, metric: Metric) -> f64 {
        self.0[metric.index()]
    }

    #[cfg(test)]
    #[expect(
        clippy::indexing_slicing,
        reason = "Metric discriminants are 0..METRIC_COUNT by construction."
    )]
    pub const fn set(&mut self, metric: Metric, value: f64) {
        self.0[metric.index()] = value;
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f64; METRIC_COUNT] {
        &self.0
    }

    /// Pairs every value with its metric, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl TryFrom<Vec<f64>> for MetricValues {
    type Error = AppError;

    fn try_from(values: Vec<f64>) -> AppResult<Self> {
        let actual = values.len();
        let array: [f64; METRIC_COUNT] = values.try_into().map_err(|_rejected: Vec<f64>| {
            AppError::aggregate(AggregateError::RecordLength {
                expected: METRIC_COUNT,
                actual,
            })
        })?;
        Ok(Self(array))
    }
}

impl Serialize for MetricValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(METRIC_COUNT))?;
        for (metric, value) in self.iter() {
            map.serialize_entry(metric.name(), &value)?;
        }
        map.end()
    }
}

/// Structured decode of one worker's report for one run.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceRecord {
    pub run: RunMeta,
    pub request: BenchmarkRequest,
    pub metrics: MetricValues,
    pub net_io_unit: String,
    pub net_io_bps: String,
    /// Complete report text as received from the worker.
    #[serde(skip)]
    pub raw: String,
}

impl PerformanceRecord {
    #[must_use]
    pub const fn get(&self, metric: Metric) -> f64 {
        self.metrics.get(metric)
    }
}
