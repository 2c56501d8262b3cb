//! Console progress and summary reporting

use crate::error::AppError;
use crate::models::source::TargetSource;
use crate::stats::SampleSummary;
use colored::Colorize;
use std::path::Path;

/// Console-first reporter for pipeline progress and results.
///
/// Both pipelines are strictly sequential, so plain line-by-line output is
/// the whole story; there is no progress bar to reconcile with.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    enable_color: bool,
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(enable_color: bool, verbose: bool) -> Self {
        Self {
            enable_color,
            verbose,
        }
    }

    /// Announce that a source audit is starting (report pipeline)
    pub fn source_started(&self, index: usize, total: usize, source: &TargetSource) {
        let label = format!("[{}/{}]", index + 1, total);
        if self.enable_color {
            println!("{} Auditing {} ({})", label.bold(), source.name.cyan(), source.url);
        } else {
            println!("{} Auditing {} ({})", label, source.name, source.url);
        }
    }

    /// Report a resolved source with its performance score
    pub fn source_finished(&self, source: &TargetSource, score: f64) {
        let score_text = format!("score {}", score);
        if self.enable_color {
            println!("    {} {}", source.tag.dimmed(), score_text.green());
        } else {
            println!("    {} {}", source.tag, score_text);
        }
    }

    /// Report an isolated source failure (continue policy)
    pub fn source_failed(&self, source: &TargetSource, error: &AppError) {
        let line = format!(
            "    {} failed: {}",
            source.name,
            error.format_for_console(self.enable_color)
        );
        if self.enable_color {
            eprintln!("{}", line.yellow());
        } else {
            eprintln!("{}", line);
        }
    }

    /// Per-run progress line for the statistics pipeline
    pub fn run_progress(&self, run: u32, total: u32, value: f64) {
        let label = format!("run {}/{}", run, total);
        if self.enable_color {
            println!("{}: {:.2}", label.bold(), value);
        } else {
            println!("{}: {:.2}", label, value);
        }
    }

    /// Final statistics summary: median, P50, P90, and the sorted samples
    pub fn stats_summary(&self, audit_id: &str, summary: &SampleSummary) {
        println!();
        if self.enable_color {
            println!("{} ({} runs)", audit_id.bold(), summary.sample_count());
            println!("  median: {}", format!("{:.2}", summary.median).green());
            println!("  p50:    {}", format!("{:.2}", summary.p50).green());
            println!("  p90:    {}", format!("{:.2}", summary.p90).green());
        } else {
            println!("{} ({} runs)", audit_id, summary.sample_count());
            println!("  median: {:.2}", summary.median);
            println!("  p50:    {:.2}", summary.p50);
            println!("  p90:    {:.2}", summary.p90);
        }
        println!(
            "  samples: [{}]",
            summary
                .samples
                .iter()
                .map(|v| format!("{:.2}", v))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    /// Announce the written report file
    pub fn report_written(&self, path: &Path, row_count: usize) {
        let message = format!(
            "Report with {} row(s) written to {}",
            row_count,
            path.display()
        );
        if self.enable_color {
            println!("{}", message.green());
        } else {
            println!("{}", message);
        }
    }

    /// Emit a warning line
    pub fn warning(&self, message: &str) {
        if self.enable_color {
            eprintln!("{} {}", "warning:".yellow().bold(), message);
        } else {
            eprintln!("warning: {}", message);
        }
    }

    /// Emit a debug line, only in verbose mode
    pub fn debug(&self, message: &str) {
        if self.verbose {
            if self.enable_color {
                println!("{} {}", "debug:".dimmed(), message.dimmed());
            } else {
                println!("debug: {}", message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_construction() {
        let reporter = ConsoleReporter::new(false, true);
        assert!(!reporter.enable_color);
        assert!(reporter.verbose);
    }
}
