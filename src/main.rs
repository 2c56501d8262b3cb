//! Page Benchmark Runner - Main CLI Application

use clap::Parser;
use pagebench::{
    cli::{Cli, PipelineCommand},
    config::load_config,
    error::{AppError, Result},
    models::RunConfig,
    output::{ConsoleReporter, CsvWriter},
    pipeline::{ReportPipeline, StatsPipeline},
    runner::{ChromeLauncher, LaunchOptions, LighthouseRunner},
    PKG_NAME, VERSION,
};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    cli.validate()?;

    if cli.debug {
        println!(
            "{} v{} ({}, commit {}, built {})",
            PKG_NAME,
            VERSION,
            pagebench::TARGET_TRIPLE,
            pagebench::GIT_COMMIT,
            pagebench::BUILD_TIME
        );
        println!("Debug mode enabled");
        println!();
    }

    let command = cli.command.clone();

    if let PipelineCommand::InitEnv { path } = &command {
        pagebench::config::EnvManager::save_example_env_file(path)?;
        println!("Example environment file written to {}", path.display());
        return Ok(());
    }

    let config = load_config(cli)?;

    if config.debug {
        println!("Configuration loaded successfully:");
        println!("{}", pagebench::config::display_config_summary(&config));
        println!();
    }

    let reporter = ConsoleReporter::new(config.enable_color, config.verbose || config.debug);
    let runner = LighthouseRunner::new(config.lighthouse_bin.clone(), config.audit_timeout());

    match command {
        PipelineCommand::Report { .. } => run_report(&config, &runner, &reporter).await,
        PipelineCommand::Stats { .. } => run_stats(&config, &runner, &reporter).await,
        // Already handled above
        PipelineCommand::InitEnv { .. } => Ok(()),
    }
}

/// Execute the report pipeline and write the CSV file
async fn run_report(
    config: &RunConfig,
    runner: &LighthouseRunner,
    reporter: &ConsoleReporter,
) -> Result<()> {
    let pipeline = ReportPipeline::new(
        config.sources.clone(),
        config.audits.clone(),
        config.settings(),
    )?
    .with_failure_policy(config.failure_policy());

    let table = pipeline.run(runner, reporter).await?;

    if table.data_row_count() == 0 {
        return Err(AppError::audit(
            "every source audit failed; no report written",
        ));
    }
    if table.data_row_count() < pipeline.source_count() {
        reporter.warning(&format!(
            "{} of {} sources failed and were skipped",
            pipeline.source_count() - table.data_row_count(),
            pipeline.source_count()
        ));
    }

    let writer = CsvWriter::new(config.output_dir.clone());
    let path = writer.write(&table)?;
    reporter.report_written(&path, table.data_row_count());

    Ok(())
}

/// Execute the statistics pipeline and print the summary
async fn run_stats(
    config: &RunConfig,
    runner: &LighthouseRunner,
    reporter: &ConsoleReporter,
) -> Result<()> {
    let source = config
        .sources
        .first()
        .ok_or_else(|| AppError::validation("Statistics pipeline needs a target URL"))?;

    let launcher = ChromeLauncher::new()?;
    let launch_options =
        LaunchOptions::new(config.port).with_chrome_path(config.chrome_bin.clone());

    let pipeline = StatsPipeline::new(
        source.url.clone(),
        config.stats_audit_id.clone(),
        config.run_count,
        config.settings(),
    )?
    .with_launch_options(launch_options);

    let summary = pipeline.run(&launcher, runner, reporter).await?;
    reporter.stats_summary(&config.stats_audit_id, &summary);

    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!("  - Verify URL formats (must start with http:// or https://)");
            eprintln!("  - Sources are \"name,tag,url\" triples");
        }
        AppError::Audit(_) => {
            eprintln!();
            eprintln!("Audit troubleshooting:");
            eprintln!("  - Verify the audit engine is installed (npm install -g lighthouse)");
            eprintln!("  - Check that the target page is reachable");
            eprintln!("  - Re-run with --debug for the engine's stderr");
        }
        AppError::Browser(_) => {
            eprintln!();
            eprintln!("Browser troubleshooting:");
            eprintln!("  - Install Chrome or Chromium, or point --chrome-bin at a binary");
            eprintln!("  - Check that the debugging port is not already in use");
        }
        AppError::Timeout(_) => {
            eprintln!();
            eprintln!("Timeout troubleshooting:");
            eprintln!("  - Increase the ceiling with --timeout");
            eprintln!("  - Try the unthrottled preset (drop --throttled)");
        }
        _ => {}
    }
}
