//! Audit-engine settings, presets, and deep-merge

use crate::defaults;
use crate::types::{FormFactor, ThrottlingMethod};
use serde::{Deserialize, Serialize};

/// Simulated network/CPU constraints applied when throttling via devtools
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrottlingProfile {
    /// Simulated round-trip time, milliseconds
    pub rtt_ms: u64,
    /// Simulated downlink throughput, kilobits per second
    pub throughput_kbps: u64,
    /// CPU slowdown multiplier applied during the audit
    pub cpu_slowdown_multiplier: f64,
}

/// Options handed to the audit engine for every invocation.
///
/// Built once by merging a base preset with an environment-specific override;
/// immutable after construction. The port is the only field rewritten later,
/// when the statistics pipeline binds the settings to a launched browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Simulated device class
    pub form_factor: FormFactor,
    /// Whether constraints are simulated or taken from the environment
    pub throttling_method: ThrottlingMethod,
    /// Constraint profile, only meaningful with devtools throttling
    pub throttling: Option<ThrottlingProfile>,
    /// Maximum wait for first contentful paint, milliseconds
    pub max_wait_for_fcp: u64,
    /// Maximum wait for page load, milliseconds
    pub max_wait_for_load: u64,
    /// Categories the engine should compute
    pub only_categories: Vec<String>,
    /// Audits the engine should run; report columns must be a subset of these
    pub only_audits: Vec<String>,
    /// Keep browser storage between runs
    pub disable_storage_reset: bool,
    /// Browser-automation port the engine attaches to
    pub port: u16,
}

/// Partial settings merged over a base preset; set fields win
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverride {
    pub form_factor: Option<FormFactor>,
    pub throttling_method: Option<ThrottlingMethod>,
    pub throttling: Option<ThrottlingProfile>,
    pub max_wait_for_fcp: Option<u64>,
    pub max_wait_for_load: Option<u64>,
    pub only_categories: Option<Vec<String>>,
    pub only_audits: Option<Vec<String>>,
    pub disable_storage_reset: Option<bool>,
    pub port: Option<u16>,
}

impl AuditSettings {
    /// Shared base preset: performance category only, default wait ceilings
    pub fn base() -> Self {
        Self {
            form_factor: FormFactor::Desktop,
            throttling_method: ThrottlingMethod::Provided,
            throttling: None,
            max_wait_for_fcp: defaults::DEFAULT_MAX_WAIT_FOR_FCP_MS,
            max_wait_for_load: defaults::DEFAULT_MAX_WAIT_FOR_LOAD_MS,
            only_categories: vec!["performance".to_string()],
            only_audits: Vec::new(),
            disable_storage_reset: false,
            port: defaults::DEFAULT_PORT,
        }
    }

    /// Desktop preset measuring against the real, unthrottled environment
    pub fn desktop_fast() -> Self {
        Self::base().merged(SettingsOverride {
            form_factor: Some(FormFactor::Desktop),
            throttling_method: Some(ThrottlingMethod::Provided),
            ..Default::default()
        })
    }

    /// Desktop preset with devtools-simulated network and CPU constraints
    pub fn desktop_slow() -> Self {
        Self::base().merged(SettingsOverride {
            form_factor: Some(FormFactor::Desktop),
            throttling_method: Some(ThrottlingMethod::Devtools),
            throttling: Some(ThrottlingProfile {
                rtt_ms: 150,
                throughput_kbps: 5 * 1024,
                cpu_slowdown_multiplier: 0.7,
            }),
            ..Default::default()
        })
    }

    /// Merge an override into these settings; override fields win
    pub fn merged(self, overrides: SettingsOverride) -> Self {
        Self {
            form_factor: overrides.form_factor.unwrap_or(self.form_factor),
            throttling_method: overrides.throttling_method.unwrap_or(self.throttling_method),
            throttling: overrides.throttling.or(self.throttling),
            max_wait_for_fcp: overrides.max_wait_for_fcp.unwrap_or(self.max_wait_for_fcp),
            max_wait_for_load: overrides.max_wait_for_load.unwrap_or(self.max_wait_for_load),
            only_categories: overrides.only_categories.unwrap_or(self.only_categories),
            only_audits: overrides.only_audits.unwrap_or(self.only_audits),
            disable_storage_reset: overrides
                .disable_storage_reset
                .unwrap_or(self.disable_storage_reset),
            port: overrides.port.unwrap_or(self.port),
        }
    }

    /// Restrict the engine to the audits named by the report columns
    pub fn with_audits<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only_audits = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Bind these settings to a concrete browser-automation port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Render as CLI flags for the audit engine
    pub fn to_cli_flags(&self) -> Vec<String> {
        let mut flags = vec![
            format!("--emulated-form-factor={}", self.form_factor.as_str()),
            format!("--throttling-method={}", self.throttling_method.as_str()),
            format!("--max-wait-for-fcp={}", self.max_wait_for_fcp),
            format!("--max-wait-for-load={}", self.max_wait_for_load),
            format!("--port={}", self.port),
        ];

        if !self.only_categories.is_empty() {
            flags.push(format!("--only-categories={}", self.only_categories.join(",")));
        }
        if !self.only_audits.is_empty() {
            flags.push(format!("--only-audits={}", self.only_audits.join(",")));
        }
        if let Some(profile) = &self.throttling {
            flags.push(format!("--throttling.rttMs={}", profile.rtt_ms));
            flags.push(format!("--throttling.throughputKbps={}", profile.throughput_kbps));
            flags.push(format!(
                "--throttling.cpuSlowdownMultiplier={}",
                profile.cpu_slowdown_multiplier
            ));
        }
        if self.disable_storage_reset {
            flags.push("--disable-storage-reset".to_string());
        }

        flags
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self::base()
    }
}
