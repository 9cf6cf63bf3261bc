use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, AppResult, ReportError};

/// Capture name of the net I/O unit label (e.g. `KB/s`).
pub const NET_IO_UNIT: &str = "net_io_unit";
/// Capture name of the preformatted bits-per-second string.
pub const NET_IO_BPS: &str = "net_io_bps";

/// Numeric groups are named after `Metric::name`, in `Metric::ALL` order.
const REPORT_SOURCE: &str = concat!(
    r"Maximum connect burst length: (?P<connect_burst_length>[0-9]*)",
    "\n\n",
    r"Total: connections (?P<total_connections>[0-9]*) requests (?P<total_requests>[0-9]*) replies (?P<total_replies>[0-9]*) test-duration (?P<test_duration>[0-9]*\.?[0-9]*) s",
    "\n\n",
    r"Connection rate: (?P<connection_rate>[0-9]*\.?[0-9]*) conn/s \((?P<connection_period_ms>[0-9]*\.?[0-9]*) ms/conn, <=(?P<concurrent_connections>[0-9]*) concurrent connections\)",
    "\n",
    r"Connection time \[ms\]: min (?P<connection_time_min>[0-9]*\.?[0-9]*) avg (?P<connection_time_avg>[0-9]*\.?[0-9]*) max (?P<connection_time_max>[0-9]*\.?[0-9]*) median (?P<connection_time_median>[0-9]*\.?[0-9]*) stddev (?P<connection_time_stddev>[0-9]*\.?[0-9]*)",
    "\n",
    r"Connection time \[ms\]: connect (?P<connection_time_connect>[0-9]*\.?[0-9]*)",
    "\n",
    r"Connection length \[replies/conn\]: (?P<replies_per_connection>[0-9]*\.?[0-9]*)",
    "\n\n",
    r"Request rate: (?P<request_rate>[0-9]*\.?[0-9]*) req/s \((?P<request_period_ms>[0-9]*\.?[0-9]*) ms/req\)",
    "\n",
    r"Request size \[B\]: (?P<request_size>[0-9]*\.?[0-9]*)",
    "\n\n",
    r"Reply rate \[replies/s\]: min (?P<reply_rate_min>[0-9]*\.?[0-9]*) avg (?P<reply_rate_avg>[0-9]*\.?[0-9]*) max (?P<reply_rate_max>[0-9]*\.?[0-9]*) stddev (?P<reply_rate_stddev>[0-9]*\.?[0-9]*) \((?P<reply_rate_samples>[0-9]*) samples\)",
    "\n",
    r"Reply time \[ms\]: response (?P<reply_time_response>[0-9]*\.?[0-9]*) transfer (?P<reply_time_transfer>[0-9]*\.?[0-9]*)",
    "\n",
    r"Reply size \[B\]: header (?P<reply_size_header>[0-9]*\.?[0-9]*) content (?P<reply_size_content>[0-9]*\.?[0-9]*) footer (?P<reply_size_footer>[0-9]*\.?[0-9]*) \(total (?P<reply_size_total>[0-9]*\.?[0-9]*)\)",
    "\n",
    r"Reply status: 1xx=(?P<reply_status_1xx>[0-9]*) 2xx=(?P<reply_status_2xx>[0-9]*) 3xx=(?P<reply_status_3xx>[0-9]*) 4xx=(?P<reply_status_4xx>[0-9]*) 5xx=(?P<reply_status_5xx>[0-9]*)",
    "\n\n",
    r"CPU time \[s\]: user (?P<cpu_time_user>[0-9]*\.?[0-9]*) system (?P<cpu_time_system>[0-9]*\.?[0-9]*) \(user (?P<cpu_percent_user>[0-9]*\.?[0-9]*)% system (?P<cpu_percent_system>[0-9]*\.?[0-9]*)% total (?P<cpu_percent_total>[0-9]*\.?[0-9]*)%\)",
    "\n",
    r"Net I/O: (?P<net_io>[0-9]*\.?[0-9]*) (?P<net_io_unit>.*) \((?P<net_io_bps>.*) bps\)",
    "\n\n",
    r"Errors: total (?P<errors_total>[0-9]*) client-timo (?P<errors_client_timeout>[0-9]*) socket-timo (?P<errors_socket_timeout>[0-9]*) connrefused (?P<errors_connection_refused>[0-9]*) connreset (?P<errors_connection_reset>[0-9]*)",
    "\n",
    r"Errors: fd-unavail (?P<errors_fd_unavailable>[0-9]*) addrunavail (?P<errors_address_unavailable>[0-9]*) ftab-full (?P<errors_table_full>[0-9]*) other (?P<errors_other>[0-9]*)",
);

static REPORT_PATTERN: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(REPORT_SOURCE));

pub(super) fn report_pattern() -> AppResult<&'static Regex> {
    REPORT_PATTERN.as_ref().map_err(|err| {
        AppError::report(ReportError::Pattern {
            message: err.to_string(),
        })
    })
}
