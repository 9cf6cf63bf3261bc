use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report did not match expected shape: {report:?}")]
    ShapeMismatch { report: String },
    #[error("Field {position} ({name}) could not be parsed as a number: {source}")]
    Field {
        position: usize,
        name: &'static str,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Report pattern failed to compile: {message}")]
    Pattern { message: String },
    #[error("Report capture '{name}' was missing from the match.")]
    MissingCapture { name: &'static str },
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
