use std::time::Duration;

use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::domain::{BenchmarkRequest, ExecutionResult};
use crate::error::{AppError, AppResult, DistributedError};
use crate::distributed::protocol::{
    BenchmarkMessage, ErrorMessage, ResultMessage, WireMessage, read_message, send_message,
};
use crate::distributed::utils::{duration_to_ms, request_id_for};

/// Calls every worker concurrently, one task each, and waits for all of them.
///
/// Results keep the order of `workers`. The first failure in that order is
/// returned once every call has finished.
pub(super) async fn call_all(
    workers: &[String],
    request: &BenchmarkRequest,
    call_timeout: Option<Duration>,
) -> AppResult<Vec<(String, ExecutionResult)>> {
    let mut handles = Vec::with_capacity(workers.len());
    for (index, worker) in workers.iter().enumerate() {
        let task_worker = worker.clone();
        let task_request = request.clone();
        let request_id = request_id_for(index);
        let handle = tokio::spawn(async move {
            call_worker(&task_worker, request_id, task_request, call_timeout).await
        });
        handles.push((worker.clone(), handle));
    }

    let mut results = Vec::with_capacity(handles.len());
    let mut first_error: Option<AppError> = None;
    for (worker, handle) in handles {
        let outcome = handle.await.map_err(|err| {
            AppError::distributed(DistributedError::WorkerTask {
                worker: worker.clone(),
                source: err,
            })
        });
        match outcome.and_then(|result| result) {
            Ok(result) => results.push((worker, result)),
            Err(err) => {
                warn!("Worker {} failed: {}", worker, err);
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    first_error.map_or(Ok(results), Err)
}

/// Sends one benchmark request to `worker` and waits for its reply.
///
/// # Errors
///
/// Returns an error if the worker cannot be reached, the exchange breaks,
/// the worker reports a failure, or `call_timeout` elapses first.
pub async fn call_worker(
    worker: &str,
    request_id: u64,
    request: BenchmarkRequest,
    call_timeout: Option<Duration>,
) -> AppResult<ExecutionResult> {
    let call = exchange(worker, request_id, request);
    match call_timeout {
        Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_elapsed| {
            AppError::distributed(DistributedError::CallTimeout {
                worker: worker.to_owned(),
                timeout_ms: duration_to_ms(limit),
            })
        })?,
        None => call.await,
    }
}

async fn exchange(
    worker: &str,
    request_id: u64,
    request: BenchmarkRequest,
) -> AppResult<ExecutionResult> {
    debug!("Dialing worker {}", worker);
    let stream = TcpStream::connect(worker).await.map_err(|err| {
        AppError::distributed(DistributedError::Connection {
            addr: worker.to_owned(),
            source: err,
        })
    })?;
    let (read_half, mut write_half) = stream.into_split();
    send_message(
        &mut write_half,
        &WireMessage::Benchmark(BenchmarkMessage {
            request_id,
            request,
        }),
    )
    .await?;
    debug!("Request {} sent to {}", request_id, worker);

    let mut reader = BufReader::new(read_half);
    match read_message(&mut reader).await? {
        WireMessage::Result(ResultMessage {
            request_id: actual,
            result,
        }) => {
            if actual != request_id {
                return Err(AppError::distributed(DistributedError::RequestIdMismatch {
                    expected: request_id,
                    actual,
                }));
            }
            debug!("Worker {} returned {} bytes", worker, result.stdout.len());
            Ok(result)
        }
        WireMessage::Error(ErrorMessage { kind, message, .. }) => {
            Err(AppError::distributed(DistributedError::Remote {
                worker: worker.to_owned(),
                kind,
                message,
            }))
        }
        WireMessage::Benchmark(_) => Err(AppError::distributed(
            DistributedError::UnexpectedMessage {
                peer: worker.to_owned(),
            },
        )),
    }
}
