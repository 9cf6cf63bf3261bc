use std::sync::Arc;
use std::time::Duration;

use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::domain::BenchmarkRequest;
use crate::error::{AppError, AppResult, DistributedError, ExecFailureKind};
use crate::exec::{BenchmarkPort, HttperfPort};

use super::protocol::{
    BenchmarkMessage, ErrorMessage, ResultMessage, WireMessage, read_message, send_message,
};

/// Settings of the `agent` subcommand.
#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub listen: String,
    pub tool: String,
    pub tool_timeout: Duration,
}

/// Binds the listen address and serves benchmark calls until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listen address cannot be bound.
pub async fn run_agent(options: AgentOptions) -> AppResult<()> {
    let listener = TcpListener::bind(&options.listen).await.map_err(|err| {
        AppError::distributed(DistributedError::Bind {
            addr: options.listen.clone(),
            source: err,
        })
    })?;
    let port = Arc::new(HttperfPort::new(options.tool, options.tool_timeout));
    info!(
        "Agent listening on {} (tool {}, timeout {}s)",
        options.listen,
        port.tool(),
        options.tool_timeout.as_secs()
    );

    tokio::select! {
        result = serve_agent(listener, port) => result,
        signal = tokio::signal::ctrl_c() => {
            if let Err(err) = signal {
                warn!("Failed to listen for Ctrl-C: {}", err);
            }
            info!("Agent shutting down");
            Ok(())
        }
    }
}

/// Accepts controller connections forever, one task per connection.
///
/// # Errors
///
/// Does not return under normal operation; accept failures are logged and
/// the loop continues.
pub async fn serve_agent<TPort>(listener: TcpListener, port: Arc<TPort>) -> AppResult<()>
where
    TPort: BenchmarkPort + Send + Sync + 'static,
{
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!("Failed to accept connection: {}", err);
                continue;
            }
        };
        debug!("Accepted controller connection from {}", peer);
        let port = Arc::clone(&port);
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, port.as_ref()).await {
                warn!("Connection from {} ended with error: {}", peer, err);
            }
        });
    }
}

async fn handle_connection<TPort>(stream: TcpStream, port: &TPort) -> AppResult<()>
where
    TPort: BenchmarkPort + Sync,
{
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    loop {
        let message = match read_message(&mut reader).await {
            Ok(message) => message,
            Err(AppError::Distributed(DistributedError::ConnectionClosed)) => return Ok(()),
            Err(err) => {
                let reply = protocol_error(0, err.to_string());
                if let Err(send_err) = send_message(&mut write_half, &reply).await {
                    debug!("Could not report protocol error: {}", send_err);
                }
                return Err(err);
            }
        };

        let reply = match message {
            WireMessage::Benchmark(BenchmarkMessage {
                request_id,
                request,
            }) => run_request(port, request_id, request).await,
            WireMessage::Result(ResultMessage { request_id, .. })
            | WireMessage::Error(ErrorMessage { request_id, .. }) => protocol_error(
                request_id,
                "Agents only accept benchmark messages.".to_owned(),
            ),
        };
        send_message(&mut write_half, &reply).await?;
    }
}

async fn run_request<TPort>(port: &TPort, request_id: u64, request: BenchmarkRequest) -> WireMessage
where
    TPort: BenchmarkPort + Sync,
{
    if let Err(err) = request.validate() {
        return protocol_error(request_id, err.to_string());
    }
    info!(
        "Request {}: benchmarking {}:{}{}",
        request_id, request.host, request.port, request.uri
    );
    match port.run_benchmark(&request).await {
        Ok(result) => {
            debug!(
                "Request {} produced {} bytes of report",
                request_id,
                result.stdout.len()
            );
            WireMessage::Result(ResultMessage { request_id, result })
        }
        Err(err) => {
            let kind = if let AppError::Exec(exec) = &err {
                exec.kind()
            } else {
                ExecFailureKind::Protocol
            };
            warn!("Request {} failed ({}): {}", request_id, kind.as_str(), err);
            WireMessage::Error(ErrorMessage {
                request_id,
                kind,
                message: err.to_string(),
            })
        }
    }
}

fn protocol_error(request_id: u64, message: String) -> WireMessage {
    WireMessage::Error(ErrorMessage {
        request_id,
        kind: ExecFailureKind::Protocol,
        message,
    })
}
