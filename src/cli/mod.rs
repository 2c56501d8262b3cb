//! Command-line interface

use crate::error::{AppError, Result};
use crate::models::source::TargetSource;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Page Benchmark Runner - sequential page-performance auditing and aggregation
#[derive(Parser, Debug, Clone)]
#[command(name = "pagebench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: PipelineCommand,

    /// Force colored output
    #[arg(long, global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Browser-automation port shared by all audit invocations
    #[arg(long, global = true, value_name = "PORT")]
    pub port: Option<u16>,

    /// Wall-clock ceiling for one audit invocation, in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Audit engine binary (resolved from PATH by default)
    #[arg(long, global = true, value_name = "PATH")]
    pub lighthouse_bin: Option<PathBuf>,

    /// Browser binary (well-known names probed by default)
    #[arg(long, global = true, value_name = "PATH")]
    pub chrome_bin: Option<PathBuf>,
}

/// Which pipeline to run
#[derive(Subcommand, Debug, Clone)]
pub enum PipelineCommand {
    /// Audit every target source once and write a timestamped CSV report
    Report {
        /// Target source as "name,tag,url" (repeatable, order preserved)
        #[arg(long = "source", value_name = "NAME,TAG,URL", action = ArgAction::Append)]
        sources: Vec<String>,

        /// Shorthand target URL; name and tag are derived from the host
        #[arg(long = "url", value_name = "URL", action = ArgAction::Append)]
        urls: Vec<String>,

        /// Use the devtools-throttled desktop preset instead of the fast one
        #[arg(long)]
        throttled: bool,

        /// Directory receiving the CSV report
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Abandon the whole report on the first source failure
        #[arg(long)]
        abort_on_failure: bool,
    },

    /// Audit one target repeatedly and print percentile statistics
    Stats {
        /// Target URL
        #[arg(long, value_name = "URL")]
        url: String,

        /// Number of repeated runs
        #[arg(short, long, value_name = "N")]
        count: Option<u32>,

        /// Audit id whose numeric value is sampled
        #[arg(long, value_name = "AUDIT_ID")]
        audit: Option<String>,

        /// Use the devtools-throttled desktop preset instead of the fast one
        #[arg(long)]
        throttled: bool,
    },

    /// Write a documented example .env file and exit
    InitEnv {
        /// Where to write the example file
        #[arg(long, value_name = "PATH", default_value = ".env.example")]
        path: PathBuf,
    },
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<()> {
        if self.color && self.no_color {
            return Err(AppError::validation(
                "Cannot specify both --color and --no-color",
            ));
        }

        if let PipelineCommand::Report { sources, urls, .. } = &self.command {
            if sources.is_empty() && urls.is_empty() {
                return Err(AppError::validation(
                    "Report pipeline needs at least one target via --source or --url",
                ));
            }
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }
}

/// Parse a "name,tag,url" triple into a target source
pub fn parse_source(value: &str) -> Result<TargetSource> {
    let mut parts = value.splitn(3, ',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(tag), Some(url)) if !name.is_empty() && !url.is_empty() => {
            Ok(TargetSource::new(name.trim(), tag.trim(), url.trim()))
        }
        _ => Err(AppError::validation(format!(
            "Invalid source '{}': expected \"name,tag,url\"",
            value
        ))),
    }
}

/// Build a target source from a bare URL, labeling it by host
pub fn source_from_url(url: &str) -> Result<TargetSource> {
    let parsed = url::Url::parse(url)?;
    let name = parsed.host_str().unwrap_or("page").to_string();
    Ok(TargetSource::new(name, "custom".to_string(), url.to_string()))
}

/// Automatic color detection honoring NO_COLOR and dumb terminals
fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    match std::env::var("TERM") {
        Ok(term) => term != "dumb",
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_requires_a_target() {
        let cli = Cli::parse_from(["pagebench", "report"]);
        assert!(cli.validate().is_err());

        let cli = Cli::parse_from(["pagebench", "report", "--url", "https://example.com"]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_conflicting_color_flags() {
        let cli = Cli::parse_from([
            "pagebench",
            "report",
            "--url",
            "https://example.com",
            "--color",
            "--no-color",
        ]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_parse_source_triple() {
        let source = parse_source("Landing Page,landing,https://example.com/home").unwrap();
        assert_eq!(source.name, "Landing Page");
        assert_eq!(source.tag, "landing");
        assert_eq!(source.url, "https://example.com/home");
    }

    #[test]
    fn test_parse_source_rejects_missing_fields() {
        assert!(parse_source("only-a-name").is_err());
        assert!(parse_source("name,tag").is_err());
        assert!(parse_source(",tag,https://example.com").is_err());
    }

    #[test]
    fn test_source_from_url_labels_by_host() {
        let source = source_from_url("https://example.com/pricing").unwrap();
        assert_eq!(source.name, "example.com");
        assert_eq!(source.tag, "custom");
    }

    #[test]
    fn test_stats_subcommand_parsing() {
        let cli = Cli::parse_from([
            "pagebench",
            "stats",
            "--url",
            "https://example.com",
            "--count",
            "25",
            "--audit",
            "first-contentful-paint",
        ]);

        match cli.command {
            PipelineCommand::Stats { url, count, audit, .. } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(count, Some(25));
                assert_eq!(audit.as_deref(), Some("first-contentful-paint"));
            }
            _ => panic!("expected stats subcommand"),
        }
    }

    #[test]
    fn test_init_env_subcommand_parsing() {
        let cli = Cli::parse_from(["pagebench", "init-env"]);
        match cli.command {
            PipelineCommand::InitEnv { path } => {
                assert_eq!(path, PathBuf::from(".env.example"));
            }
            _ => panic!("expected init-env subcommand"),
        }
        assert!(Cli::parse_from(["pagebench", "init-env"]).validate().is_ok());
    }

    #[test]
    fn test_source_order_preserved() {
        let cli = Cli::parse_from([
            "pagebench",
            "report",
            "--source",
            "B,b,https://b.example",
            "--source",
            "A,a,https://a.example",
        ]);

        match cli.command {
            PipelineCommand::Report { sources, .. } => {
                assert_eq!(sources, vec!["B,b,https://b.example", "A,a,https://a.example"]);
            }
            _ => panic!("expected report subcommand"),
        }
    }
}
