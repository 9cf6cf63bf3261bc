use thiserror::Error;

use super::ExecFailureKind;

#[derive(Debug, Error)]
pub enum DistributedError {
    #[error("At least one --worker address is required.")]
    NoWorkers,
    #[error("I/O error during {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Connection error to {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Bind error on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Connection closed.")]
    ConnectionClosed,
    #[error("Wire message exceeded max size ({max_bytes} bytes).")]
    WireMessageTooLarge { max_bytes: usize },
    #[error("Wire message was not valid UTF-8: {source}")]
    WireMessageInvalidUtf8 {
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("Serialization error during {context}: {source}")]
    Serialize {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Deserialization error during {context}: {source}")]
    Deserialize {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Request id mismatch (expected {expected}, got {actual}).")]
    RequestIdMismatch { expected: u64, actual: u64 },
    #[error("Unexpected message from {peer}.")]
    UnexpectedMessage { peer: String },
    #[error("Worker {worker} failed ({}): {message}", kind.as_str())]
    Remote {
        worker: String,
        kind: ExecFailureKind,
        message: String,
    },
    #[error("Worker {worker} did not answer within {timeout_ms}ms.")]
    CallTimeout { worker: String, timeout_ms: u64 },
    #[error("Worker task for {worker} failed: {source}")]
    WorkerTask {
        worker: String,
        #[source]
        source: tokio::task::JoinError,
    },
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
