//! Append-only archival outputs of a run.
mod append;
mod records;
mod summary_log;


#[cfg(test)]
use append::AppendLog;
pub use records::{RecordsExport, read_record_rows, record_rows};
#[cfg(test)]
use records::{record_header, record_row};
pub use summary_log::SummaryLog;
