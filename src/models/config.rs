//! Run configuration data model and validation

use crate::defaults;
use crate::error::{AppError, Result};
use crate::models::settings::AuditSettings;
use crate::models::source::{default_audit_specs, AuditSpec, TargetSource};
use crate::pipeline::FailurePolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration, assembled from defaults, environment
/// variables, and CLI arguments before any pipeline starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Ordered target sources for the report pipeline
    pub sources: Vec<TargetSource>,

    /// Ordered audit specifications defining the report columns
    pub audits: Vec<AuditSpec>,

    /// Apply the devtools-throttled preset instead of the unthrottled one
    #[serde(default)]
    pub throttled: bool,

    /// Repeat count for the statistics pipeline
    #[serde(default = "default_run_count")]
    pub run_count: u32,

    /// Audit id whose numeric value the statistics pipeline samples
    #[serde(default = "default_stats_audit_id")]
    pub stats_audit_id: String,

    /// Directory that receives CSV reports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Browser-automation port shared by all audit invocations
    #[serde(default = "default_port")]
    pub port: u16,

    /// Audit engine binary
    #[serde(default = "default_lighthouse_bin")]
    pub lighthouse_bin: PathBuf,

    /// Browser binary override; resolved from well-known names when unset
    #[serde(default)]
    pub chrome_bin: Option<PathBuf>,

    /// Wall-clock ceiling for one audit invocation, seconds
    #[serde(default = "default_audit_timeout_secs")]
    pub audit_timeout_seconds: u64,

    /// Abandon the whole report on the first source failure
    #[serde(default)]
    pub abort_on_failure: bool,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            audits: default_audit_specs(),
            throttled: false,
            run_count: default_run_count(),
            stats_audit_id: default_stats_audit_id(),
            output_dir: default_output_dir(),
            port: default_port(),
            lighthouse_bin: default_lighthouse_bin(),
            chrome_bin: None,
            audit_timeout_seconds: default_audit_timeout_secs(),
            abort_on_failure: false,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl RunConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the per-audit timeout as a Duration
    pub fn audit_timeout(&self) -> Duration {
        Duration::from_secs(self.audit_timeout_seconds)
    }

    /// Failure policy derived from the abort flag
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.abort_on_failure {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Continue
        }
    }

    /// Build the merged audit settings for this run: environment preset,
    /// restricted to the requested audits, bound to the configured port.
    pub fn settings(&self) -> AuditSettings {
        let preset = if self.throttled {
            AuditSettings::desktop_slow()
        } else {
            AuditSettings::desktop_fast()
        };
        preset
            .with_audits(self.audits.iter().map(|a| a.id.clone()))
            .with_port(self.port)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        for source in &self.sources {
            if source.url.is_empty() {
                return Err(AppError::config("Target URL cannot be empty"));
            }
            if let Err(e) = url::Url::parse(&source.url) {
                return Err(AppError::config(format!(
                    "Invalid target URL '{}': {}",
                    source.url, e
                )));
            }
        }

        if self.audits.is_empty() {
            return Err(AppError::config("At least one audit column is required"));
        }
        for audit in &self.audits {
            if audit.id.is_empty() || audit.heading.is_empty() {
                return Err(AppError::config("Audit id and heading cannot be empty"));
            }
        }

        if self.run_count == 0 {
            return Err(AppError::config("Run count must be greater than 0"));
        }
        if self.run_count > 1000 {
            return Err(AppError::config("Run count cannot exceed 1000"));
        }

        if self.port < 1024 {
            return Err(AppError::config(
                "Browser-automation port must be 1024 or higher",
            ));
        }

        if self.audit_timeout_seconds == 0 {
            return Err(AppError::config("Audit timeout must be greater than 0"));
        }
        if self.audit_timeout_seconds > 600 {
            return Err(AppError::config("Audit timeout cannot exceed 600 seconds"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(output_dir) = std::env::var("PAGEBENCH_OUTPUT_DIR") {
            if !output_dir.trim().is_empty() {
                self.output_dir = PathBuf::from(output_dir.trim());
            }
        }

        if let Ok(port) = std::env::var("PAGEBENCH_PORT") {
            self.port = port.parse().map_err(|e| {
                AppError::config(format!("Invalid PAGEBENCH_PORT value '{}': {}", port, e))
            })?;
        }

        if let Ok(run_count) = std::env::var("PAGEBENCH_RUN_COUNT") {
            self.run_count = run_count.parse().map_err(|e| {
                AppError::config(format!(
                    "Invalid PAGEBENCH_RUN_COUNT value '{}': {}",
                    run_count, e
                ))
            })?;
        }

        if let Ok(bin) = std::env::var("PAGEBENCH_LIGHTHOUSE_BIN") {
            if !bin.trim().is_empty() {
                self.lighthouse_bin = PathBuf::from(bin.trim());
            }
        }

        if let Ok(bin) = std::env::var("PAGEBENCH_CHROME_BIN") {
            if !bin.trim().is_empty() {
                self.chrome_bin = Some(PathBuf::from(bin.trim()));
            }
        }

        if let Ok(enable_color) = std::env::var("PAGEBENCH_ENABLE_COLOR") {
            self.enable_color = enable_color.parse().map_err(|e| {
                AppError::config(format!(
                    "Invalid PAGEBENCH_ENABLE_COLOR value '{}': {}",
                    enable_color, e
                ))
            })?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_run_count() -> u32 {
    defaults::DEFAULT_RUN_COUNT
}

fn default_stats_audit_id() -> String {
    defaults::DEFAULT_STATS_AUDIT_ID.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_OUTPUT_DIR)
}

fn default_port() -> u16 {
    defaults::DEFAULT_PORT
}

fn default_lighthouse_bin() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_LIGHTHOUSE_BIN)
}

fn default_audit_timeout_secs() -> u64 {
    defaults::DEFAULT_AUDIT_TIMEOUT.as_secs()
}

fn default_enable_color() -> bool {
    defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ThrottlingMethod;

    #[test]
    fn test_default_config_is_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_source_url() {
        let mut config = RunConfig::default();
        config.sources = vec![TargetSource::new("Bad", "bad", "not-a-url")];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_run_count_invalid() {
        let mut config = RunConfig::default();
        config.run_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_privileged_port_invalid() {
        let mut config = RunConfig::default();
        config.port = 80;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_audit_list_invalid() {
        let mut config = RunConfig::default();
        config.audits.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_settings_follow_throttled_flag() {
        let mut config = RunConfig::default();
        config.port = 49400;

        let fast = config.settings();
        assert_eq!(fast.throttling_method, ThrottlingMethod::Provided);
        assert_eq!(fast.port, 49400);
        // Report columns are a subset of the audits the engine runs
        assert_eq!(fast.only_audits.len(), config.audits.len());

        config.throttled = true;
        let slow = config.settings();
        assert_eq!(slow.throttling_method, ThrottlingMethod::Devtools);
        assert!(slow.throttling.is_some());
    }

    #[test]
    fn test_failure_policy_mapping() {
        let mut config = RunConfig::default();
        assert_eq!(config.failure_policy(), FailurePolicy::Continue);
        config.abort_on_failure = true;
        assert_eq!(config.failure_policy(), FailurePolicy::Abort);
    }
}
