//! Statistics pipeline: repeated single-target runner

use crate::error::{AppError, Result};
use crate::models::settings::AuditSettings;
use crate::output::console::ConsoleReporter;
use crate::runner::{AuditRunner, BrowserLauncher, LaunchOptions};
use crate::stats::{SampleSet, SampleSummary};

/// Runs a fixed configuration against one target N times, sampling a single
/// audit's numeric value per run, then reduces the samples into median and
/// nearest-rank tail percentiles.
#[derive(Debug)]
pub struct StatsPipeline {
    url: String,
    audit_id: String,
    run_count: u32,
    settings: AuditSettings,
    launch_options: LaunchOptions,
}

impl StatsPipeline {
    pub fn new<S: Into<String>>(
        url: S,
        audit_id: S,
        run_count: u32,
        settings: AuditSettings,
    ) -> Result<Self> {
        if run_count == 0 {
            return Err(AppError::validation(
                "Statistics pipeline requires a positive run count",
            ));
        }

        let launch_options = LaunchOptions::new(settings.port);
        Ok(Self {
            url: url.into(),
            audit_id: audit_id.into(),
            run_count,
            settings,
            launch_options,
        })
    }

    pub fn with_launch_options(mut self, options: LaunchOptions) -> Self {
        self.launch_options = options;
        self
    }

    /// Launch one browser session, reuse it for all N sequential runs, and
    /// release it on every exit path before reporting the aggregate.
    ///
    /// A release failure after a successful collection is still fatal; after
    /// a failed collection the collection error wins and the release failure
    /// is only logged.
    pub async fn run(
        &self,
        launcher: &dyn BrowserLauncher,
        runner: &dyn AuditRunner,
        reporter: &ConsoleReporter,
    ) -> Result<SampleSummary> {
        let mut session = launcher.launch(&self.launch_options).await?;
        reporter.debug(&format!(
            "browser session ready on port {}",
            session.port()
        ));

        let collected = self.collect(session.port(), runner, reporter).await;
        let released = session.kill().await;

        let samples = match (collected, released) {
            (Err(run_error), release_result) => {
                if let Err(release_error) = release_result {
                    reporter.warning(&format!(
                        "browser session release failed after run error: {}",
                        release_error
                    ));
                }
                return Err(run_error);
            }
            (Ok(_), Err(release_error)) => {
                reporter.warning(&format!(
                    "browser session release failed: {}",
                    release_error
                ));
                return Err(release_error);
            }
            (Ok(samples), Ok(())) => samples,
        };

        samples.summarize()
    }

    /// The sequential sampling loop, bound to the launched session's port
    async fn collect(
        &self,
        port: u16,
        runner: &dyn AuditRunner,
        reporter: &ConsoleReporter,
    ) -> Result<SampleSet> {
        let settings = self.settings.clone().with_port(port);
        let mut samples = SampleSet::new();

        for run in 1..=self.run_count {
            let report = runner.run(&self.url, &settings).await?;
            let value = report.audit_numeric(&self.audit_id).ok_or_else(|| {
                AppError::audit(format!(
                    "audit '{}' has no numeric value in run {}",
                    self.audit_id, run
                ))
            })?;

            samples.push(value);
            reporter.run_progress(run, self.run_count, value);
        }

        Ok(samples)
    }
}
