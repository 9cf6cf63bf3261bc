use serde::{Deserialize, Serialize};

/// Raw capture of one tool run.
///
/// `exit_status` carries the real process exit code; it is `None` only when
/// the process was terminated by a signal. Non-zero exits are surfaced as
/// errors by the runner, so a delivered result holds `Some(0)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: Option<i32>,
}
