use std::time::Duration;

use serde::Deserialize;

use crate::args::{parse_duration, parse_run_duration};
use crate::error::ValidationError;
use crate::error::{AppError, AppResult, ConfigError};

/// Contents of `swarmperf.toml` / `swarmperf.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub agent: Option<AgentConfig>,
    pub controller: Option<ControllerConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub listen: Option<String>,
    pub tool: Option<String>,
    pub tool_timeout: Option<DurationValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    pub workers: Option<Vec<String>>,
    pub target: Option<TargetConfig>,
    pub summary_log: Option<String>,
    pub records: Option<String>,
    pub error_threshold: Option<u64>,
    pub call_timeout: Option<DurationValue>,
}

/// Benchmark parameters shared by every worker.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub uri: Option<String>,
    pub connections: Option<u64>,
    pub rate: Option<u64>,
    pub calls: Option<u64>,
    pub duration: Option<DurationValue>,
}

/// Either whole seconds or a string with a unit suffix (`500ms`, `2m`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self, field: &'static str) -> AppResult<Duration> {
        self.parse_with(field, parse_duration)
    }

    /// Whole seconds only, for the benchmark run length.
    pub(crate) fn to_run_duration(&self, field: &'static str) -> AppResult<Duration> {
        self.parse_with(field, parse_run_duration)
    }

    fn parse_with(
        &self,
        field: &'static str,
        parse: fn(&str) -> Result<Duration, ValidationError>,
    ) -> AppResult<Duration> {
        let parsed = match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse(text),
        };
        parsed.map_err(|err| AppError::config(ConfigError::InvalidDuration { field, source: err }))
    }
}
