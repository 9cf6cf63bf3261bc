use crate::aggregate::ClusterSummary;
use crate::domain::RunMeta;
use crate::report::{Metric, PerformanceRecord};

fn format_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "n/a".to_owned(), format_percent)
}

#[expect(
    clippy::float_arithmetic,
    reason = "Success rate is displayed as a percentage."
)]
fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Prints one line per worker record, in worker order.
pub(crate) fn print_worker_records(workers: &[String], records: &[PerformanceRecord]) {
    for (worker, record) in workers.iter().zip(records) {
        println!(
            "Worker {}: {} requests, {} replies, {} errors, {} replies/s avg",
            worker,
            record.get(Metric::TotalRequests),
            record.get(Metric::TotalReplies),
            record.get(Metric::ErrorsTotal),
            record.get(Metric::ReplyRateAvg)
        );
    }
}

/// Prints the console report of one run.
pub(crate) fn print_summary(
    run: Option<&RunMeta>,
    summary: &ClusterSummary,
    error_threshold: Option<u64>,
) {
    if let Some(run) = run {
        println!("Run: {} (started {})", run.run_id, run.started_at());
    }
    println!("Workers: {}", summary.workers);
    println!(
        "Total Connections: {}",
        summary.get(Metric::TotalConnections)
    );
    println!("Total Requests: {}", summary.get(Metric::TotalRequests));
    println!("Total Replies: {}", summary.get(Metric::TotalReplies));
    println!("Success Rate: {}", format_rate(summary.success_rate()));
    println!("Test Duration: {}s", summary.get(Metric::TestDuration));
    println!(
        "Connection Time (min/avg/max): {}ms / {}ms / {}ms",
        summary.get(Metric::ConnectionTimeMin),
        summary.get(Metric::ConnectionTimeAvg),
        summary.get(Metric::ConnectionTimeMax)
    );
    println!(
        "Reply Rate (min/avg/max): {} / {} / {} replies/s",
        summary.get(Metric::ReplyRateMin),
        summary.get(Metric::ReplyRateAvg),
        summary.get(Metric::ReplyRateMax)
    );
    println!(
        "Reply Status (1xx/2xx/3xx/4xx/5xx): {} / {} / {} / {} / {}",
        summary.get(Metric::ReplyStatus1xx),
        summary.get(Metric::ReplyStatus2xx),
        summary.get(Metric::ReplyStatus3xx),
        summary.get(Metric::ReplyStatus4xx),
        summary.get(Metric::ReplyStatus5xx)
    );
    println!("Net I/O: {}", summary.get(Metric::NetIo));
    println!("Total Errors: {}", summary.total_errors());
    println!("Client-Side Errors: {}", summary.client_errors());
    if summary.exceeds_error_threshold(error_threshold) {
        println!("Error Threshold Exceeded: yes");
    }
    println!("Summary: {}", summary.to_line());
}

#[cfg(test)]
mod tests {
    use super::format_rate;
    use crate::error::{AppError, AppResult};

    #[test]
    fn undefined_rate_prints_placeholder() -> AppResult<()> {
        if format_rate(None) != "n/a" {
            return Err(AppError::distributed("Expected n/a for an undefined rate"));
        }
        if format_rate(Some(0.975)) != "97.50%" {
            return Err(AppError::distributed("Expected a two-decimal percentage"));
        }
        Ok(())
    }
}
