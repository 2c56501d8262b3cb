//! Error handling for the page benchmark runner

use thiserror::Error;

/// Custom error types for the page benchmark runner
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Audit-invocation errors (navigation, instrumentation, engine failure)
    #[error("Audit error: {0}")]
    Audit(String),

    /// Browser-session errors (launch, readiness, teardown)
    #[error("Browser error: {0}")]
    Browser(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// I/O errors (report file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (URLs, engine JSON output, etc.)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Statistics calculation errors
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new audit-invocation error
    pub fn audit<S: Into<String>>(message: S) -> Self {
        Self::Audit(message.into())
    }

    /// Create a new browser-session error
    pub fn browser<S: Into<String>>(message: S) -> Self {
        Self::Browser(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new statistics error
    pub fn statistics<S: Into<String>>(message: S) -> Self {
        Self::Statistics(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Audit(_) => "AUDIT",
            Self::Browser(_) => "BROWSER",
            Self::Timeout(_) => "TIMEOUT",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Statistics(_) => "STATS",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Check if error is recoverable (a later source may still succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Audit(_) | Self::Timeout(_) => true,
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => false,
            Self::Browser(_) | Self::Io(_) | Self::Statistics(_) | Self::Internal(_) => false,
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1, // Invalid configuration/usage
            Self::Audit(_) => 2,                                         // Audit engine issues
            Self::Timeout(_) => 3,                                       // Timeout issues
            Self::Browser(_) => 4,                                       // Browser session issues
            Self::Io(_) => 5,                                            // I/O issues
            Self::Statistics(_) => 6,                                    // Aggregation issues
            Self::Internal(_) => 99,                                     // Internal/unexpected errors
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file or command line arguments.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid input: {}\n\nSuggestion: Check the format of your URLs, run counts, or other configuration values.", msg)
            }
            Self::Audit(msg) => {
                format!("Audit invocation failed: {}\n\nSuggestion: Verify that the audit engine is installed and the target page is reachable.", msg)
            }
            Self::Browser(msg) => {
                format!("Browser session failed: {}\n\nSuggestion: Check that a Chrome/Chromium binary is installed and the debugging port is free.", msg)
            }
            Self::Timeout(msg) => {
                format!("Operation timed out: {}\n\nSuggestion: Increase the timeout with --timeout or pick a lighter target page.", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check output directory permissions and disk space.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse data: {}\n\nSuggestion: The audit engine may have produced unexpected output; re-run with --debug.", msg)
            }
            Self::Statistics(msg) => {
                format!("Statistics calculation failed: {}\n\nSuggestion: This may indicate insufficient or invalid sample data.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Audit(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Timeout(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Browser(_) => {
                    format!("[{}] {}", category.magenta().bold(), message.magenta())
                }
                Self::Io(_) | Self::Statistics(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library and ecosystem error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::parse(format!("URL parse error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::timeout(error.to_string())
        } else {
            Self::browser(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(AppError::config("x").category(), "CONFIG");
        assert_eq!(AppError::audit("x").category(), "AUDIT");
        assert_eq!(AppError::browser("x").category(), "BROWSER");
        assert_eq!(AppError::timeout("x").category(), "TIMEOUT");
        assert_eq!(AppError::statistics("x").category(), "STATS");
    }

    #[test]
    fn test_recoverable_classification() {
        // A failed audit does not poison later sources; a broken browser does.
        assert!(AppError::audit("navigation failed").is_recoverable());
        assert!(AppError::timeout("no FCP within ceiling").is_recoverable());
        assert!(!AppError::browser("devtools port unreachable").is_recoverable());
        assert!(!AppError::config("bad url").is_recoverable());
    }

    #[test]
    fn test_exit_codes_are_stable() {
        assert_eq!(AppError::config("x").exit_code(), 1);
        assert_eq!(AppError::audit("x").exit_code(), 2);
        assert_eq!(AppError::timeout("x").exit_code(), 3);
        assert_eq!(AppError::browser("x").exit_code(), 4);
        assert_eq!(AppError::internal("x").exit_code(), 99);
    }

    #[test]
    fn test_plain_console_format() {
        let err = AppError::audit("engine exited with status 1");
        let formatted = err.format_for_console(false);
        assert_eq!(formatted, "[AUDIT] Audit error: engine exited with status 1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.category(), "IO");
    }
}
