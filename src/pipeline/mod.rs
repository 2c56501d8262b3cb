//! The two sequential benchmark pipelines
//!
//! Both pipelines run audits strictly one at a time: the shared
//! browser-automation port does not support overlapping sessions, so the next
//! run never starts before the previous one has fully resolved.

pub mod report;
pub mod stats;

pub use report::{FailurePolicy, ReportPipeline};
pub use stats::StatsPipeline;
