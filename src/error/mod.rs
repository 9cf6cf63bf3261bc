mod aggregate;
mod app;
mod config;
mod distributed;
mod exec;
mod report;
mod sink;
mod validation;

#[cfg(test)]
mod test_support;

pub use aggregate::AggregateError;
pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use distributed::DistributedError;
pub use exec::{ExecError, ExecFailureKind, StreamKind};
pub use report::ReportError;
pub use sink::SinkError;
pub use validation::ValidationError;
