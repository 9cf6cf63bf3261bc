use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tracing::{debug, info, warn};

use crate::domain::{BenchmarkRequest, ExecutionResult};
use crate::error::{AppError, AppResult, ExecError, StreamKind};

use super::argv::build_args;
use super::locate::locate_tool;

pub const DEFAULT_TOOL: &str = "httperf";
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(600);

/// Runs one benchmark and hands back the tool's raw output.
#[async_trait]
pub trait BenchmarkPort {
    async fn run_benchmark(&self, request: &BenchmarkRequest) -> AppResult<ExecutionResult>;
}

/// [`BenchmarkPort`] backed by a local `httperf` binary.
#[derive(Debug, Clone)]
pub struct HttperfPort {
    tool: String,
    timeout: Duration,
}

impl HttperfPort {
    #[must_use]
    pub fn new(tool: impl Into<String>, timeout: Duration) -> Self {
        Self {
            tool: tool.into(),
            timeout,
        }
    }

    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }
}

impl Default for HttperfPort {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL, DEFAULT_TOOL_TIMEOUT)
    }
}

#[async_trait]
impl BenchmarkPort for HttperfPort {
    async fn run_benchmark(&self, request: &BenchmarkRequest) -> AppResult<ExecutionResult> {
        info!(
            "Running {} against {}:{}",
            self.tool, request.host, request.port
        );
        let path = locate_tool(&self.tool)?;
        let args = build_args(request);
        let result = run_tool(&path, &args, self.timeout).await;
        if let Err(err) = &result {
            warn!("Benchmark against {}:{} failed: {}", request.host, request.port, err);
        }
        result
    }
}

/// Spawns `path` with `args` and collects its complete output.
///
/// # Errors
///
/// Returns an [`ExecError`] when the process cannot be spawned, a stream
/// cannot be attached or read, waiting fails, the process exits unsuccessfully,
/// or it is still running after `timeout` (it is killed in that case).
pub async fn run_tool(path: &Path, args: &[String], timeout: Duration) -> AppResult<ExecutionResult> {
    debug!("Spawning {} {}", path.display(), args.join(" "));
    let mut child = Command::new(path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|err| {
            AppError::exec(ExecError::Spawn {
                path: PathBuf::from(path),
                source: err,
            })
        })?;
    let pid = child.id().unwrap_or(0);
    debug!("Spawned pid {}", pid);

    let stdout = child.stdout.take().ok_or_else(|| {
        AppError::exec(ExecError::StreamUnavailable {
            stream: StreamKind::Stdout,
        })
    })?;
    let stderr = child.stderr.take().ok_or_else(|| {
        AppError::exec(ExecError::StreamUnavailable {
            stream: StreamKind::Stderr,
        })
    })?;

    match tokio::time::timeout(timeout, collect(&mut child, pid, stdout, stderr)).await {
        Ok(result) => result,
        Err(_elapsed) => {
            warn!("Pid {} still running after {:?}, killing it", pid, timeout);
            if let Err(err) = child.kill().await {
                warn!("Failed to kill pid {}: {}", pid, err);
            }
            Err(AppError::exec(ExecError::TimedOut {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }))
        }
    }
}

async fn collect(
    child: &mut Child,
    pid: u32,
    stdout: ChildStdout,
    stderr: ChildStderr,
) -> AppResult<ExecutionResult> {
    let (stdout, stderr) = tokio::try_join!(
        drain(stdout, StreamKind::Stdout),
        drain(stderr, StreamKind::Stderr)
    )?;
    debug!(
        "Drained pid {} ({} bytes stdout, {} bytes stderr)",
        pid,
        stdout.len(),
        stderr.len()
    );

    let status = child
        .wait()
        .await
        .map_err(|err| AppError::exec(ExecError::Wait { pid, source: err }))?;
    let stderr = String::from_utf8_lossy(&stderr).into_owned();
    if !status.success() {
        return Err(AppError::exec(ExecError::AbnormalExit {
            pid,
            status: status.to_string(),
            stderr,
        }));
    }

    info!("Pid {} exited ({})", pid, status);
    Ok(ExecutionResult {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr,
        exit_status: status.code(),
    })
}

async fn drain<R>(mut stream: R, kind: StreamKind) -> AppResult<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    stream
        .read_to_end(&mut buffer)
        .await
        .map_err(|err| AppError::exec(ExecError::Read { stream: kind, source: err }))?;
    Ok(buffer)
}
