//! Report pipeline: sequential multi-target runner

use crate::error::{AppError, Result};
use crate::models::report::ReportTable;
use crate::models::settings::AuditSettings;
use crate::models::source::{AuditSpec, TargetSource};
use crate::output::console::ConsoleReporter;
use crate::runner::AuditRunner;
use serde::{Deserialize, Serialize};

/// What to do when a single source audit fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Log the failure, skip the source's row, keep going
    #[default]
    Continue,
    /// Abandon the remaining sources; no report is written
    Abort,
}

/// Runs a fixed audit configuration against each target source, exactly once,
/// in declaration order, and assembles one report table from the results.
#[derive(Debug)]
pub struct ReportPipeline {
    sources: Vec<TargetSource>,
    audits: Vec<AuditSpec>,
    settings: AuditSettings,
    failure_policy: FailurePolicy,
}

impl ReportPipeline {
    /// Build a pipeline over a non-empty source list.
    ///
    /// The audit specifications define the report columns and must be a
    /// subset of the audits the settings ask the engine to run.
    pub fn new(
        sources: Vec<TargetSource>,
        audits: Vec<AuditSpec>,
        settings: AuditSettings,
    ) -> Result<Self> {
        if sources.is_empty() {
            return Err(AppError::validation(
                "Report pipeline requires at least one target source",
            ));
        }
        if audits.is_empty() {
            return Err(AppError::validation(
                "Report pipeline requires at least one audit column",
            ));
        }
        if !settings.only_audits.is_empty() {
            if let Some(unrequested) = audits
                .iter()
                .find(|spec| !settings.only_audits.contains(&spec.id))
            {
                return Err(AppError::validation(format!(
                    "Audit column '{}' is not among the audits the settings run",
                    unrequested.id
                )));
            }
        }

        Ok(Self {
            sources,
            audits,
            settings,
            failure_policy: FailurePolicy::default(),
        })
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Run every source audit in order and accumulate the report table.
    ///
    /// Strictly sequential: each invocation is awaited to completion before
    /// the next begins. Under `FailurePolicy::Continue` a failed source is
    /// logged and skipped; under `Abort` the first failure abandons the rest.
    pub async fn run(
        &self,
        runner: &dyn AuditRunner,
        reporter: &ConsoleReporter,
    ) -> Result<ReportTable> {
        let mut table = ReportTable::new(&self.audits);
        let total = self.sources.len();

        for (index, source) in self.sources.iter().enumerate() {
            reporter.source_started(index, total, source);

            match runner.run(&source.url, &self.settings).await {
                Ok(report) => {
                    reporter.source_finished(source, report.performance_score());
                    table.push_source_row(source, &report, &self.audits);
                }
                Err(error) => match self.failure_policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::Continue => reporter.source_failed(source, &error),
                },
            }
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(n: usize) -> Vec<TargetSource> {
        (0..n)
            .map(|i| {
                TargetSource::new(
                    format!("Source {}", i),
                    format!("tag{}", i),
                    format!("https://example.com/{}", i),
                )
            })
            .collect()
    }

    fn audits() -> Vec<AuditSpec> {
        vec![AuditSpec::new("speed-index", "SPI")]
    }

    #[test]
    fn test_empty_source_list_rejected() {
        let err = ReportPipeline::new(Vec::new(), audits(), AuditSettings::desktop_fast())
            .unwrap_err();
        assert_eq!(err.category(), "VALIDATION");
    }

    #[test]
    fn test_empty_audit_list_rejected() {
        let err = ReportPipeline::new(sources(1), Vec::new(), AuditSettings::desktop_fast())
            .unwrap_err();
        assert_eq!(err.category(), "VALIDATION");
    }

    #[test]
    fn test_columns_must_be_subset_of_requested_audits() {
        let settings = AuditSettings::desktop_fast().with_audits(["first-contentful-paint"]);
        let err = ReportPipeline::new(sources(1), audits(), settings).unwrap_err();
        assert_eq!(err.category(), "VALIDATION");
    }

    #[test]
    fn test_columns_accepted_when_requested() {
        let settings = AuditSettings::desktop_fast().with_audits(["speed-index"]);
        assert!(ReportPipeline::new(sources(2), audits(), settings).is_ok());
    }
}
