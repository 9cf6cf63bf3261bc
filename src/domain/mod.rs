//! Plain data exchanged between the controller, the agents and the report
//! pipeline.
mod request;
mod result;
mod run;

pub use request::BenchmarkRequest;
pub use result::ExecutionResult;
pub use run::RunMeta;
