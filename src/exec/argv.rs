use crate::domain::BenchmarkRequest;

/// Arguments passed to `httperf`, in a fixed order.
#[must_use]
pub fn build_args(request: &BenchmarkRequest) -> Vec<String> {
    vec![
        "--server".to_owned(),
        request.host.clone(),
        "--port".to_owned(),
        request.port.to_string(),
        "--uri".to_owned(),
        request.uri.clone(),
        "--num-conns".to_owned(),
        request.connections.to_string(),
        "--rate".to_owned(),
        request.connection_rate.to_string(),
        "--num-calls".to_owned(),
        request.calls_per_connection.to_string(),
        "--hog".to_owned(),
    ]
}
