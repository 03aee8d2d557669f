//! Shared components for CLI commands.
//!
//! Run statistics, logging setup, progress reporting and the consolidated
//! run log used by the process command.

use std::fs;
use std::io::Write;
use std::path::Path;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::app::services::document_pipeline::{DocumentOutcome, DocumentReport};
use crate::constants::RUN_LOG_FILE;
use crate::error::Result;

/// Batch-level statistics for reporting
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub documents_processed: usize,
    pub documents_failed: usize,
    pub records_written: usize,
    pub warnings_logged: usize,
    pub processing_time: std::time::Duration,
}

impl RunStats {
    pub fn from_reports(reports: &[DocumentReport]) -> Self {
        let mut stats = Self::default();
        for report in reports {
            match &report.outcome {
                DocumentOutcome::Completed { records, warnings } => {
                    stats.documents_processed += 1;
                    stats.records_written += records;
                    stats.warnings_logged += warnings.len();
                }
                DocumentOutcome::Failed { .. } => stats.documents_failed += 1,
            }
        }
        stats
    }

    /// Whether the batch hit the hard-error class
    pub fn any_failed(&self) -> bool {
        self.documents_failed > 0
    }
}

/// Set up structured logging
pub fn setup_logging(log_level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("beilage_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Progress bar for the batch loop
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    bar
}

/// Write the consolidated run log next to the outputs.
///
/// One block per document: status, record/warning counts, then every
/// warning and the failure reason verbatim.
pub fn write_run_log(output_dir: &Path, reports: &[DocumentReport]) -> Result<()> {
    let path = output_dir.join(RUN_LOG_FILE);
    let mut file = fs::File::create(&path)?;
    writeln!(
        file,
        "run at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;

    for report in reports {
        match &report.outcome {
            DocumentOutcome::Completed { records, warnings } => {
                writeln!(
                    file,
                    "{}: ok, {} records, {} warnings",
                    report.source_id,
                    records,
                    warnings.len()
                )?;
                for warning in warnings {
                    writeln!(file, "  warning: {}", warning)?;
                }
            }
            DocumentOutcome::Failed { error } => {
                writeln!(file, "{}: FAILED: {}", report.source_id, error)?;
            }
        }
    }
    Ok(())
}

/// Print the per-document summary and batch totals
pub fn print_summary(reports: &[DocumentReport], stats: &RunStats) {
    println!();
    for report in reports {
        match &report.outcome {
            DocumentOutcome::Completed { records, warnings } => {
                let line = format!(
                    "  {} {} ({} records, {} warnings)",
                    "ok".green(),
                    report.source_id,
                    records,
                    warnings.len()
                );
                println!("{}", line);
            }
            DocumentOutcome::Failed { error } => {
                println!("  {} {}: {}", "FAILED".red().bold(), report.source_id, error);
            }
        }
    }
    println!();
    let totals = format!(
        "{} documents, {} failed, {} records, {} warnings in {:.1?}",
        stats.documents_processed + stats.documents_failed,
        stats.documents_failed,
        stats.records_written,
        stats.warnings_logged,
        stats.processing_time
    );
    if stats.any_failed() {
        println!("{}", totals.yellow());
    } else {
        println!("{}", totals.green());
    }
}
