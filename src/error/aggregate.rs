use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("No data to aggregate.")]
    NoData,
    #[error("Malformed record length (expected {expected} metrics, got {actual}).")]
    RecordLength { expected: usize, actual: usize },
    #[error("Records row {line} has an unparsable metric '{name}': {source}")]
    RecordValue {
        line: usize,
        name: &'static str,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Records header column '{column}' is not at its metric position.")]
    HeaderMismatch { column: String },
    #[error("No records found for run '{run_id}'.")]
    UnknownRun { run_id: String },
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
