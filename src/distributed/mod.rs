//! Controller and worker agent talking line-delimited JSON over TCP.
//!
//! The controller dials every worker, sends one `benchmark` request per call
//! and waits for exactly one `result` or `error` reply.
mod agent;
mod controller;
mod protocol;
mod utils;


pub use agent::{AgentOptions, run_agent};
pub(crate) use controller::{print_summary, print_worker_records};
pub use controller::{ControllerOptions, run_controller};

#[cfg(test)]
use agent::serve_agent;
#[cfg(test)]
use controller::call_worker;
