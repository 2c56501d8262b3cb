//! Environment variable and .env file handling

use crate::error::{AppError, Result};
use std::path::Path;

/// Names of all environment variables the application understands
pub const ENV_VAR_NAMES: &[&str] = &[
    "PAGEBENCH_OUTPUT_DIR",
    "PAGEBENCH_PORT",
    "PAGEBENCH_RUN_COUNT",
    "PAGEBENCH_LIGHTHOUSE_BIN",
    "PAGEBENCH_CHROME_BIN",
    "PAGEBENCH_ENABLE_COLOR",
];

/// Manages .env file loading and environment variable validation
pub struct EnvManager;

impl EnvManager {
    /// Load the .env file from the working directory if one exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        match dotenv::dotenv() {
            Ok(path) => {
                if debug {
                    println!("Loaded environment from {}", path.display());
                }
                Ok(())
            }
            // A missing .env file is not an error
            Err(dotenv::Error::Io(_)) => Ok(()),
            Err(e) => Err(AppError::config(format!("Failed to load .env file: {}", e))),
        }
    }

    /// Validate every recognized environment variable that is currently set.
    ///
    /// Runs before the values are merged into the configuration, so the merge
    /// never sees a malformed value.
    pub fn validate_current_env() -> Result<()> {
        for name in ENV_VAR_NAMES {
            if let Ok(value) = std::env::var(name) {
                Self::validate_env_var(name, &value)?;
            }
        }
        Ok(())
    }

    /// Validate one environment variable's value before it is applied
    pub fn validate_env_var(name: &str, value: &str) -> Result<()> {
        match name {
            "PAGEBENCH_OUTPUT_DIR" | "PAGEBENCH_LIGHTHOUSE_BIN" | "PAGEBENCH_CHROME_BIN" => {
                if value.trim().is_empty() {
                    return Err(AppError::config(format!("{} cannot be empty", name)));
                }
                Ok(())
            }
            "PAGEBENCH_PORT" => {
                let port: u16 = value
                    .parse()
                    .map_err(|e| AppError::config(format!("Invalid {} '{}': {}", name, value, e)))?;
                if port < 1024 {
                    return Err(AppError::config(format!(
                        "{} must be 1024 or higher, got {}",
                        name, port
                    )));
                }
                Ok(())
            }
            "PAGEBENCH_RUN_COUNT" => {
                let count: u32 = value
                    .parse()
                    .map_err(|e| AppError::config(format!("Invalid {} '{}': {}", name, value, e)))?;
                if count == 0 || count > 1000 {
                    return Err(AppError::config(format!(
                        "{} must be between 1 and 1000, got {}",
                        name, count
                    )));
                }
                Ok(())
            }
            "PAGEBENCH_ENABLE_COLOR" => value
                .parse::<bool>()
                .map(|_| ())
                .map_err(|e| AppError::config(format!("Invalid {} '{}': {}", name, value, e))),
            _ => Err(AppError::config(format!("Unknown environment variable: {}", name))),
        }
    }

    /// Content for a documented example .env file
    pub fn create_example_env_content() -> String {
        [
            "# Page Benchmark Runner Configuration",
            "# Directory receiving CSV reports",
            "PAGEBENCH_OUTPUT_DIR=data",
            "# Browser-automation port shared by all audit invocations",
            "PAGEBENCH_PORT=49400",
            "# Repeat count for the statistics pipeline",
            "PAGEBENCH_RUN_COUNT=100",
            "# Audit engine binary (resolved from PATH by default)",
            "PAGEBENCH_LIGHTHOUSE_BIN=lighthouse",
            "# Browser binary override",
            "#PAGEBENCH_CHROME_BIN=/usr/bin/google-chrome",
            "# Colored terminal output",
            "PAGEBENCH_ENABLE_COLOR=true",
            "",
        ]
        .join("\n")
    }

    /// Write the example .env file to the given path
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        std::fs::write(path, Self::create_example_env_content())?;
        Ok(())
    }
}
