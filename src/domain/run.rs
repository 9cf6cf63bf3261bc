use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Identity of one coordinated run across all workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMeta {
    pub run_id: String,
    pub timestamp_ms: u64,
}

impl RunMeta {
    #[must_use]
    pub fn new() -> Self {
        let timestamp_ms = current_time_ms();
        Self {
            run_id: format!("{}-{}", timestamp_ms, std::process::id()),
            timestamp_ms,
        }
    }

    /// Local wall-clock rendering of the run timestamp for console output.
    #[must_use]
    pub fn started_at(&self) -> String {
        let millis = i64::try_from(self.timestamp_ms).unwrap_or(i64::MAX);
        chrono::DateTime::<chrono::Utc>::from_timestamp_millis(millis).map_or_else(
            || self.timestamp_ms.to_string(),
            |utc| {
                utc.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            },
        )
    }
}

impl Default for RunMeta {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use]
pub fn current_time_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
