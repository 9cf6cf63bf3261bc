use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ValidationError};

/// Parameters for one worker's benchmark run.
///
/// Built once by the controller and sent by value to every agent. The
/// duration is advisory: `httperf` bounds a run by connection count and rate,
/// so it is only echoed into exported records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkRequest {
    pub host: String,
    pub port: u16,
    pub uri: String,
    pub connections: u64,
    pub connection_rate: u64,
    pub calls_per_connection: u64,
    pub duration_secs: u64,
}

impl BenchmarkRequest {
    /// Checks the fields an agent cannot recover from.
    ///
    /// # Errors
    ///
    /// Returns an error when the host is blank or the uri is not absolute.
    pub fn validate(&self) -> AppResult<()> {
        if self.host.trim().is_empty() {
            return Err(AppError::validation(ValidationError::EmptyHost));
        }
        if !self.uri.starts_with('/') {
            return Err(AppError::validation(ValidationError::InvalidUri {
                value: self.uri.clone(),
            }));
        }
        Ok(())
    }
}
