//! Audit runner backed by the Lighthouse CLI

use crate::defaults;
use crate::error::{AppError, Result};
use crate::models::report::AuditReport;
use crate::models::settings::AuditSettings;
use crate::runner::AuditRunner;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Invokes the `lighthouse` CLI as a subprocess and parses its JSON report.
///
/// The engine attaches to whatever browser listens on `settings.port`; when
/// no browser is running there, Lighthouse launches and tears down its own.
#[derive(Debug, Clone)]
pub struct LighthouseRunner {
    binary: PathBuf,
    run_timeout: Duration,
}

impl LighthouseRunner {
    pub fn new<P: Into<PathBuf>>(binary: P, run_timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            run_timeout,
        }
    }

    /// Runner using the `lighthouse` binary from PATH and the default timeout
    pub fn with_defaults() -> Self {
        Self::new(defaults::DEFAULT_LIGHTHOUSE_BIN, defaults::DEFAULT_AUDIT_TIMEOUT)
    }

    fn build_command(&self, url: &str, settings: &AuditSettings) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(url)
            .arg("--output=json")
            .arg("--quiet")
            .args(settings.to_cli_flags())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl AuditRunner for LighthouseRunner {
    async fn run(&self, url: &str, settings: &AuditSettings) -> Result<AuditReport> {
        let mut cmd = self.build_command(url, settings);

        let output = timeout(self.run_timeout, cmd.output())
            .await
            .map_err(|_| {
                AppError::timeout(format!(
                    "audit of {} exceeded {}s",
                    url,
                    self.run_timeout.as_secs()
                ))
            })?
            .map_err(|e| {
                AppError::audit(format!(
                    "failed to invoke audit engine '{}': {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::audit(format!(
                "audit engine exited with {} for {}: {}",
                output.status,
                url,
                stderr.trim()
            )));
        }

        let report: AuditReport = serde_json::from_slice(&output.stdout).map_err(|e| {
            AppError::parse(format!("invalid audit report JSON for {}: {}", url, e))
        })?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_includes_settings_flags() {
        let runner = LighthouseRunner::new("lighthouse", Duration::from_secs(60));
        let settings = AuditSettings::desktop_slow()
            .with_audits(["speed-index"])
            .with_port(49400);

        let cmd = runner.build_command("https://example.com", &settings);
        let args: Vec<String> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(args[0], "https://example.com");
        assert!(args.contains(&"--output=json".to_string()));
        assert!(args.contains(&"--port=49400".to_string()));
        assert!(args.contains(&"--throttling-method=devtools".to_string()));
        assert!(args.contains(&"--only-audits=speed-index".to_string()));
    }

    #[tokio::test]
    async fn test_missing_binary_maps_to_audit_error() {
        let runner = LighthouseRunner::new(
            "/nonexistent/pagebench-lighthouse-binary",
            Duration::from_secs(5),
        );
        let settings = AuditSettings::desktop_fast();

        let err = runner.run("https://example.com", &settings).await.unwrap_err();
        assert_eq!(err.category(), "AUDIT");
    }
}
