//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Simulated device class used by the audit engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFactor {
    /// Desktop viewport and user-agent
    Desktop,
    /// Mobile viewport and user-agent
    Mobile,
}

impl FormFactor {
    /// Flag value understood by the audit engine CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            FormFactor::Desktop => "desktop",
            FormFactor::Mobile => "mobile",
        }
    }
}

/// How network/CPU constraints are applied during an audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThrottlingMethod {
    /// Constraints simulated through the browser's devtools protocol
    Devtools,
    /// Constraints taken from the real environment, unmodified
    Provided,
}

impl ThrottlingMethod {
    /// Flag value understood by the audit engine CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            ThrottlingMethod::Devtools => "devtools",
            ThrottlingMethod::Provided => "provided",
        }
    }
}
