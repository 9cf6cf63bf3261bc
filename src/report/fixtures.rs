use super::{METRIC_COUNT, Metric, MetricValues};

/// `httperf` output captured against a local nginx, including the command
/// echo line that precedes the statistics block.
pub(crate) const SAMPLE_REPORT: &str = "httperf --hog --client=0/1 --server=localhost --port=8080 --uri=/ --rate=10 --send-buffer=4096 --recv-buffer=16384 --num-conns=100 --num-calls=1
Maximum connect burst length: 1

Total: connections 100 requests 100 replies 100 test-duration 9.902 s

Connection rate: 10.1 conn/s (99.0 ms/conn, <=2 concurrent connections)
Connection time [ms]: min 0.4 avg 0.7 max 3.1 median 0.5 stddev 0.4
Connection time [ms]: connect 0.1
Connection length [replies/conn]: 1.000

Request rate: 10.1 req/s (99.0 ms/req)
Request size [B]: 62.0

Reply rate [replies/s]: min 10.0 avg 10.0 max 10.0 stddev 0.0 (1 samples)
Reply time [ms]: response 0.5 transfer 0.0
Reply size [B]: header 214.0 content 612.0 footer 0.0 (total 826.0)
Reply status: 1xx=0 2xx=100 3xx=0 4xx=0 5xx=0

CPU time [s]: user 2.61 system 7.27 (user 26.4% system 73.4% total 99.8%)
Net I/O: 8.8 KB/s (0.1*10^6 bps)

Errors: total 0 client-timo 0 socket-timo 0 connrefused 0 connreset 0
Errors: fd-unavail 0 addrunavail 0 ftab-full 0 other 0
";

/// Values every metric of [`SAMPLE_REPORT`] decodes to, in table order.
pub(crate) const SAMPLE_VALUES: [f64; METRIC_COUNT] = [
    1.0, 100.0, 100.0, 100.0, 9.902, 10.1, 99.0, 2.0, 0.4, 0.7, 3.1, 0.5, 0.4, 0.1, 1.0, 10.1,
    99.0, 62.0, 10.0, 10.0, 10.0, 0.0, 1.0, 0.5, 0.0, 214.0, 612.0, 0.0, 826.0, 0.0, 100.0, 0.0,
    0.0, 0.0, 2.61, 7.27, 26.4, 73.4, 99.8, 8.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
];

/// Renders a report in the layout the parser expects, from arbitrary values.
pub(crate) fn render_report(values: &MetricValues) -> String {
    let v = |metric: Metric| values.get(metric);
    format!(
        "Maximum connect burst length: {}

Total: connections {} requests {} replies {} test-duration {} s

Connection rate: {} conn/s ({} ms/conn, <={} concurrent connections)
Connection time [ms]: min {} avg {} max {} median {} stddev {}
Connection time [ms]: connect {}
Connection length [replies/conn]: {}

Request rate: {} req/s ({} ms/req)
Request size [B]: {}

Reply rate [replies/s]: min {} avg {} max {} stddev {} ({} samples)
Reply time [ms]: response {} transfer {}
Reply size [B]: header {} content {} footer {} (total {})
Reply status: 1xx={} 2xx={} 3xx={} 4xx={} 5xx={}

CPU time [s]: user {} system {} (user {}% system {}% total {}%)
Net I/O: {} KB/s (0.1*10^6 bps)

Errors: total {} client-timo {} socket-timo {} connrefused {} connreset {}
Errors: fd-unavail {} addrunavail {} ftab-full {} other {}
",
        v(Metric::ConnectBurstLength),
        v(Metric::TotalConnections),
        v(Metric::TotalRequests),
        v(Metric::TotalReplies),
        v(Metric::TestDuration),
        v(Metric::ConnectionRate),
        v(Metric::ConnectionPeriodMs),
        v(Metric::ConcurrentConnections),
        v(Metric::ConnectionTimeMin),
        v(Metric::ConnectionTimeAvg),
        v(Metric::ConnectionTimeMax),
        v(Metric::ConnectionTimeMedian),
        v(Metric::ConnectionTimeStddev),
        v(Metric::ConnectionTimeConnect),
        v(Metric::RepliesPerConnection),
        v(Metric::RequestRate),
        v(Metric::RequestPeriodMs),
        v(Metric::RequestSize),
        v(Metric::ReplyRateMin),
        v(Metric::ReplyRateAvg),
        v(Metric::ReplyRateMax),
        v(Metric::ReplyRateStddev),
        v(Metric::ReplyRateSamples),
        v(Metric::ReplyTimeResponse),
        v(Metric::ReplyTimeTransfer),
        v(Metric::ReplySizeHeader),
        v(Metric::ReplySizeContent),
        v(Metric::ReplySizeFooter),
        v(Metric::ReplySizeTotal),
        v(Metric::ReplyStatus1xx),
        v(Metric::ReplyStatus2xx),
        v(Metric::ReplyStatus3xx),
        v(Metric::ReplyStatus4xx),
        v(Metric::ReplyStatus5xx),
        v(Metric::CpuTimeUser),
        v(Metric::CpuTimeSystem),
        v(Metric::CpuPercentUser),
        v(Metric::CpuPercentSystem),
        v(Metric::CpuPercentTotal),
        v(Metric::NetIo),
        v(Metric::ErrorsTotal),
        v(Metric::ErrorsClientTimeout),
        v(Metric::ErrorsSocketTimeout),
        v(Metric::ErrorsConnectionRefused),
        v(Metric::ErrorsConnectionReset),
        v(Metric::ErrorsFdUnavailable),
        v(Metric::ErrorsAddressUnavailable),
        v(Metric::ErrorsTableFull),
        v(Metric::ErrorsOther),
    )
}

/// Sample values with selected metrics overridden.
pub(crate) fn sample_with(overrides: &[(Metric, f64)]) -> MetricValues {
    let mut values = MetricValues::new(SAMPLE_VALUES);
    for (metric, value) in overrides {
        values.set(*metric, *value);
    }
    values
}
