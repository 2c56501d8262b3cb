//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::{parse_source, source_from_url, Cli, PipelineCommand},
    config::env::EnvManager,
    error::Result,
    models::RunConfig,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration.
    ///
    /// Precedence: CLI arguments > environment variables > defaults.
    pub fn parse(&self) -> Result<RunConfig> {
        let mut config = RunConfig::default();

        EnvManager::load_env_file(self.cli.debug)?;
        EnvManager::validate_current_env()?;
        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut RunConfig) -> Result<()> {
        if self.cli.no_color {
            config.enable_color = false;
        } else if self.cli.color {
            config.enable_color = true;
        }
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if let Some(port) = self.cli.port {
            config.port = port;
        }
        if let Some(timeout) = self.cli.timeout {
            config.audit_timeout_seconds = timeout;
        }
        if let Some(ref bin) = self.cli.lighthouse_bin {
            config.lighthouse_bin = bin.clone();
        }
        if let Some(ref bin) = self.cli.chrome_bin {
            config.chrome_bin = Some(bin.clone());
        }

        match &self.cli.command {
            PipelineCommand::Report {
                sources,
                urls,
                throttled,
                output_dir,
                abort_on_failure,
            } => {
                // Explicit triples first, URL shorthands after, both in
                // declaration order
                let mut targets = Vec::new();
                for triple in sources {
                    targets.push(parse_source(triple)?);
                }
                for url in urls {
                    targets.push(source_from_url(url)?);
                }
                config.sources = targets;

                config.throttled = *throttled;
                config.abort_on_failure = *abort_on_failure;
                if let Some(dir) = output_dir {
                    config.output_dir = dir.clone();
                }
            }
            PipelineCommand::Stats {
                url,
                count,
                audit,
                throttled,
            } => {
                config.sources = vec![source_from_url(url)?];
                config.throttled = *throttled;
                if let Some(count) = count {
                    config.run_count = *count;
                }
                if let Some(audit) = audit {
                    config.stats_audit_id = audit.clone();
                }
            }
            // Handled in main before any configuration is needed
            PipelineCommand::InitEnv { .. } => {}
        }

        if config.debug {
            println!("Applied CLI overrides to configuration");
            println!(
                "Final config: sources={}, run_count={}, port={}, throttled={}",
                config.sources.len(),
                config.run_count,
                config.port,
                config.throttled
            );
        }

        Ok(())
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<RunConfig> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &RunConfig) -> String {
    let mut summary = Vec::new();

    summary.push(format!(
        "Sources: {}",
        config
            .sources
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    summary.push(format!(
        "Audit Columns: {}",
        config
            .audits
            .iter()
            .map(|a| a.heading.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    summary.push(format!("Throttled: {}", config.throttled));
    summary.push(format!("Run Count: {}", config.run_count));
    summary.push(format!("Port: {}", config.port));
    summary.push(format!("Output Dir: {}", config.output_dir.display()));
    summary.push(format!("Audit Timeout: {}s", config.audit_timeout_seconds));
    summary.push(format!("Color Output: {}", config.enable_color));

    summary.join("\n")
}
