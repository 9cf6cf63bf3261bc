//! Reduction of per-worker records into one cluster summary.
mod fold;
mod summary;


pub use fold::{aggregate, aggregate_rows};
#[cfg(test)]
pub(crate) use fold::aggregate_values;
pub use summary::ClusterSummary;
