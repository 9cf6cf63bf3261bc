use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    #[error("stdout")]
    Stdout,
    #[error("stderr")]
    Stderr,
}

/// Failure classes of one tool invocation, shared with the wire protocol so
/// the controller can tell infrastructure faults from configuration faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecFailureKind {
    ToolNotFound,
    SpawnFailed,
    StreamUnavailable,
    ReadFailed,
    WaitFailed,
    TimedOut,
    Protocol,
}

impl ExecFailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ExecFailureKind::ToolNotFound => "tool-not-found",
            ExecFailureKind::SpawnFailed => "spawn-failed",
            ExecFailureKind::StreamUnavailable => "stream-unavailable",
            ExecFailureKind::ReadFailed => "read-failed",
            ExecFailureKind::WaitFailed => "wait-failed",
            ExecFailureKind::TimedOut => "timed-out",
            ExecFailureKind::Protocol => "protocol",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Could not find the '{tool}' executable (searched PATH).")]
    ToolNotFound { tool: String },
    #[error("Tool path '{}' is not an executable file.", path.display())]
    ToolPathInvalid { path: PathBuf },
    #[error("Failed to spawn '{}': {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not attach to {stream} of the tool process.")]
    StreamUnavailable { stream: StreamKind },
    #[error("Could not read {stream}: {source}")]
    Read {
        stream: StreamKind,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed when waiting on pid {pid}: {source}")]
    Wait {
        pid: u32,
        #[source]
        source: std::io::Error,
    },
    #[error("Command did not properly exit (pid {pid}, {status}): {stderr}")]
    AbnormalExit {
        pid: u32,
        status: String,
        stderr: String,
    },
    #[error("Tool did not finish within {timeout_ms}ms and was killed.")]
    TimedOut { timeout_ms: u64 },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

impl ExecError {
    #[must_use]
    pub const fn kind(&self) -> ExecFailureKind {
        match self {
            ExecError::ToolNotFound { .. } | ExecError::ToolPathInvalid { .. } => {
                ExecFailureKind::ToolNotFound
            }
            ExecError::Spawn { .. } => ExecFailureKind::SpawnFailed,
            ExecError::StreamUnavailable { .. } => ExecFailureKind::StreamUnavailable,
            ExecError::Read { .. } => ExecFailureKind::ReadFailed,
            ExecError::Wait { .. } | ExecError::AbnormalExit { .. } => {
                ExecFailureKind::WaitFailed
            }
            ExecError::TimedOut { .. } => ExecFailureKind::TimedOut,
            #[cfg(test)]
            ExecError::TestExpectation { .. } | ExecError::TestExpectationValue { .. } => {
                ExecFailureKind::Protocol
            }
        }
    }
}
