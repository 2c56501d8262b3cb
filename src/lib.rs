//! Page Benchmark Runner
//!
//! A sequential benchmark-and-aggregate pipeline that drives an external
//! browser-performance-auditing engine against configured target pages and
//! reduces the numeric results into a timestamped CSV report, or into
//! nearest-rank percentile statistics over repeated runs of a single page.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod runner;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{AuditReport, AuditSettings, AuditSpec, MetricCell, ReportTable, RunConfig, TargetSource};
pub use pipeline::{FailurePolicy, ReportPipeline, StatsPipeline};
pub use runner::{AuditRunner, BrowserLauncher, BrowserSession, ChromeLauncher, LaunchOptions, LighthouseRunner};
pub use stats::{SampleSet, SampleSummary};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build metadata injected by build.rs
pub const BUILD_TIME: &str = env!("BUILD_TIME");
pub const TARGET_TRIPLE: &str = env!("TARGET_TRIPLE");
pub const GIT_COMMIT: &str = match option_env!("GIT_COMMIT") {
    Some(commit) => commit,
    None => "unknown",
};

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    /// Repeat count for the statistics pipeline
    pub const DEFAULT_RUN_COUNT: u32 = 100;
    /// Browser-automation port shared by every audit invocation
    pub const DEFAULT_PORT: u16 = 49400;
    /// Directory that receives CSV reports, relative to the working directory
    pub const DEFAULT_OUTPUT_DIR: &str = "data";
    /// Wall-clock ceiling for one audit invocation
    pub const DEFAULT_AUDIT_TIMEOUT: Duration = Duration::from_secs(180);
    /// Metric extracted by the statistics pipeline
    pub const DEFAULT_STATS_AUDIT_ID: &str = "first-meaningful-paint";
    /// Audit engine binary resolved from PATH unless overridden
    pub const DEFAULT_LIGHTHOUSE_BIN: &str = "lighthouse";
    /// Maximum wait for first contentful paint, milliseconds
    pub const DEFAULT_MAX_WAIT_FOR_FCP_MS: u64 = 15 * 1000;
    /// Maximum wait for page load, milliseconds
    pub const DEFAULT_MAX_WAIT_FOR_LOAD_MS: u64 = 35 * 1000;
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
