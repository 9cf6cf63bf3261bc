use std::path::PathBuf;

use tracing::info;

use crate::aggregate::ClusterSummary;
use crate::error::AppResult;

use super::append::AppendLog;

/// Append-only log holding one summary line per run.
#[derive(Debug, Clone)]
pub struct SummaryLog {
    log: AppendLog,
}

impl SummaryLog {
    #[must_use]
    pub fn spawn(path: PathBuf) -> Self {
        Self {
            log: AppendLog::spawn(path, None),
        }
    }

    /// # Errors
    ///
    /// Returns an error when the line cannot be appended.
    pub async fn append(&self, summary: &ClusterSummary) -> AppResult<()> {
        self.append_line(summary.to_line()).await
    }

    /// Appends a line already produced by [`ClusterSummary::to_line`].
    ///
    /// # Errors
    ///
    /// Returns an error when the line cannot be appended.
    pub async fn append_line(&self, line: String) -> AppResult<()> {
        self.log.append(line).await?;
        info!("Summary appended to {}", self.log.path().display());
        Ok(())
    }
}
