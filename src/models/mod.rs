//! Data models for sources, settings, engine reports, and run configuration

pub mod config;
pub mod report;
pub mod settings;
pub mod source;

pub use config::RunConfig;
pub use report::{AuditReport, AuditResult, Categories, CategoryScore, MetricCell, ReportTable};
pub use settings::{AuditSettings, SettingsOverride, ThrottlingProfile};
pub use source::{AuditSpec, TargetSource};
