use crate::report::{CLIENT_ERROR_METRICS, Metric, MetricValues};

/// Separator of the archival summary line.
pub const SUMMARY_DELIMITER: char = ',';

/// Cluster-wide reduction of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    pub workers: usize,
    pub values: MetricValues,
}

impl ClusterSummary {
    #[must_use]
    pub const fn get(&self, metric: Metric) -> f64 {
        self.values.get(metric)
    }

    /// The 49 reduced values in table order, joined by [`SUMMARY_DELIMITER`].
    #[must_use]
    pub fn to_line(&self) -> String {
        let mut fields = Vec::with_capacity(crate::report::METRIC_COUNT);
        for (_, value) in self.values.iter() {
            fields.push(value.to_string());
        }
        fields.join(&SUMMARY_DELIMITER.to_string())
    }

    #[must_use]
    pub const fn total_errors(&self) -> f64 {
        self.get(Metric::ErrorsTotal)
    }

    /// Replies over requests across the cluster; `None` when no request was
    /// sent at all.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "Success rate is a ratio of two summed counters."
    )]
    pub fn success_rate(&self) -> Option<f64> {
        let requests = self.get(Metric::TotalRequests);
        if requests > 0.0 {
            Some(self.get(Metric::TotalReplies) / requests)
        } else {
            None
        }
    }

    /// Errors raised on the load generator hosts themselves.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "Client error counters are summed as floating point values."
    )]
    pub fn client_errors(&self) -> f64 {
        CLIENT_ERROR_METRICS
            .iter()
            .map(|metric| self.get(*metric))
            .sum()
    }

    /// Client-side errors mean the workers, not the target, limited the run.
    #[must_use]
    pub fn is_client_degraded(&self) -> bool {
        self.client_errors() > 0.0
    }

    #[must_use]
    pub fn exceeds_error_threshold(&self, threshold: Option<u64>) -> bool {
        // For an integer limit, total >= limit iff floor(total) >= limit; the
        // float-to-int cast floors and saturates, so no limit is clamped.
        threshold.is_some_and(|limit| self.total_errors() as u64 >= limit)
    }
}
