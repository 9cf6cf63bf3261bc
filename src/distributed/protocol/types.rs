use serde::{Deserialize, Serialize};

use crate::domain::{BenchmarkRequest, ExecutionResult};
use crate::error::ExecFailureKind;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(in crate::distributed) enum WireMessage {
    Benchmark(BenchmarkMessage),
    Result(ResultMessage),
    Error(ErrorMessage),
}

#[derive(Debug, Serialize, Deserialize)]
pub(in crate::distributed) struct BenchmarkMessage {
    pub(in crate::distributed) request_id: u64,
    pub(in crate::distributed) request: BenchmarkRequest,
}

#[derive(Debug, Serialize, Deserialize)]
pub(in crate::distributed) struct ResultMessage {
    pub(in crate::distributed) request_id: u64,
    pub(in crate::distributed) result: ExecutionResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub(in crate::distributed) struct ErrorMessage {
    pub(in crate::distributed) request_id: u64,
    pub(in crate::distributed) kind: ExecFailureKind,
    pub(in crate::distributed) message: String,
}
