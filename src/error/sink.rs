use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to open '{}' for append: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode a records row: {source}")]
    EncodeRow {
        #[source]
        source: csv::Error,
    },
    #[error("Failed to decode records in '{}': {source}", path.display())]
    DecodeRows {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Line for '{}' contains a line break and would corrupt the file.", path.display())]
    EmbeddedNewline { path: PathBuf },
    #[error("Writer for '{}' is no longer running.", path.display())]
    WriterClosed { path: PathBuf },
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
