/// Number of numeric metrics in one report.
pub const METRIC_COUNT: usize = 49;

/// How one metric is combined across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Added across workers (throughput, counters).
    Sum,
    /// Added across workers, then divided by the worker count once.
    Avg,
    Min,
    Max,
}

impl Reduction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Reduction::Sum => "sum",
            Reduction::Avg => "avg",
            Reduction::Min => "min",
            Reduction::Max => "max",
        }
    }
}

macro_rules! metric_table {
    ($($variant:ident => $name:literal, $reduction:ident;)+) => {
        /// One numeric field of a report, in report order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Metric {
            $($variant,)+
        }

        impl Metric {
            /// Every metric in report order; position `i` holds the metric
            /// whose value sits at index `i` of a record.
            pub const ALL: [Metric; METRIC_COUNT] = [$(Metric::$variant,)+];

            /// Stable snake_case name used as capture group name and column
            /// header.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Metric::$variant => $name,)+
                }
            }

            #[must_use]
            pub const fn reduction(self) -> Reduction {
                match self {
                    $(Metric::$variant => Reduction::$reduction,)+
                }
            }
        }
    };
}

metric_table! {
    ConnectBurstLength => "connect_burst_length", Max;
    TotalConnections => "total_connections", Sum;
    TotalRequests => "total_requests", Sum;
    TotalReplies => "total_replies", Sum;
    TestDuration => "test_duration", Max;
    ConnectionRate => "connection_rate", Sum;
    ConnectionPeriodMs => "connection_period_ms", Avg;
    ConcurrentConnections => "concurrent_connections", Sum;
    ConnectionTimeMin => "connection_time_min", Min;
    ConnectionTimeAvg => "connection_time_avg", Avg;
    ConnectionTimeMax => "connection_time_max", Max;
    ConnectionTimeMedian => "connection_time_median", Avg;
    ConnectionTimeStddev => "connection_time_stddev", Avg;
    ConnectionTimeConnect => "connection_time_connect", Avg;
    RepliesPerConnection => "replies_per_connection", Avg;
    RequestRate => "request_rate", Sum;
    RequestPeriodMs => "request_period_ms", Avg;
    RequestSize => "request_size", Avg;
    ReplyRateMin => "reply_rate_min", Min;
    ReplyRateAvg => "reply_rate_avg", Avg;
    ReplyRateMax => "reply_rate_max", Max;
    ReplyRateStddev => "reply_rate_stddev", Avg;
    ReplyRateSamples => "reply_rate_samples", Sum;
    ReplyTimeResponse => "reply_time_response", Avg;
    ReplyTimeTransfer => "reply_time_transfer", Avg;
    ReplySizeHeader => "reply_size_header", Avg;
    ReplySizeContent => "reply_size_content", Avg;
    ReplySizeFooter => "reply_size_footer", Avg;
    ReplySizeTotal => "reply_size_total", Avg;
    ReplyStatus1xx => "reply_status_1xx", Sum;
    ReplyStatus2xx => "reply_status_2xx", Sum;
    ReplyStatus3xx => "reply_status_3xx", Sum;
    ReplyStatus4xx => "reply_status_4xx", Sum;
    ReplyStatus5xx => "reply_status_5xx", Sum;
    CpuTimeUser => "cpu_time_user", Sum;
    CpuTimeSystem => "cpu_time_system", Sum;
    CpuPercentUser => "cpu_percent_user", Avg;
    CpuPercentSystem => "cpu_percent_system", Avg;
    CpuPercentTotal => "cpu_percent_total", Avg;
    NetIo => "net_io", Sum;
    ErrorsTotal => "errors_total", Sum;
    ErrorsClientTimeout => "errors_client_timeout", Sum;
    ErrorsSocketTimeout => "errors_socket_timeout", Sum;
    ErrorsConnectionRefused => "errors_connection_refused", Sum;
    ErrorsConnectionReset => "errors_connection_reset", Sum;
    ErrorsFdUnavailable => "errors_fd_unavailable", Sum;
    ErrorsAddressUnavailable => "errors_address_unavailable", Sum;
    ErrorsTableFull => "errors_table_full", Sum;
    ErrorsOther => "errors_other", Sum;
}

/// Error counters raised by the load generator's own host rather than the
/// target server.
pub const CLIENT_ERROR_METRICS: [Metric; 4] = [
    Metric::ErrorsFdUnavailable,
    Metric::ErrorsAddressUnavailable,
    Metric::ErrorsTableFull,
    Metric::ErrorsOther,
];

impl Metric {
    /// Zero-based index into a record's value array.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// One-based position, as reported in field parse errors.
    #[must_use]
    pub const fn position(self) -> usize {
        self.index().saturating_add(1)
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|metric| metric.name() == name)
    }
}
