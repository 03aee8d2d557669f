//! Process command implementation.
//!
//! Runs the whole batch: discover dumps, process them concurrently with a
//! per-document timeout, then write the consolidated run log and print
//! the summary. Individual document failures never abort the batch; they
//! are collected and reflected in the exit status by the caller.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use super::shared::{create_progress_bar, print_summary, setup_logging, write_run_log, RunStats};
use crate::app::services::document_pipeline::{self, DocumentOutcome, DocumentReport};
use crate::app::services::output_writer::OutputWriter;
use crate::cli::args::ProcessArgs;
use crate::config::Config;
use crate::error::{Error, Result};

pub async fn run_process(args: ProcessArgs) -> Result<RunStats> {
    let start_time = Instant::now();
    setup_logging(args.log_level());
    args.validate()?;

    let mut config = Config::new(args.input_path.clone(), args.output_path.clone());
    if let Some(workers) = args.workers {
        config.parallel_workers = workers;
    }
    config.document_timeout_secs = args.timeout_secs;
    config.validate()?;
    fs::create_dir_all(&config.output_path)?;

    let dumps = crate::app::adapters::extraction::discover_dumps(&config.input_path)?;
    if dumps.is_empty() {
        return Err(Error::configuration(format!(
            "no extraction dumps found in {}",
            config.input_path.display()
        )));
    }
    info!(
        "Processing {} documents with {} workers",
        dumps.len(),
        config.parallel_workers
    );

    let reports = process_batch(&config, dumps, args.show_progress()).await;

    write_run_log(&config.output_path, &reports)?;
    let mut stats = RunStats::from_reports(&reports);
    stats.processing_time = start_time.elapsed();
    if !args.quiet {
        print_summary(&reports, &stats);
    }
    Ok(stats)
}

/// Process every dump concurrently. Parsing is CPU-bound and runs on the
/// blocking pool; the semaphore caps how many documents are in flight.
async fn process_batch(config: &Config, dumps: Vec<PathBuf>, progress: bool) -> Vec<DocumentReport> {
    let writer = Arc::new(OutputWriter::new(&config.output_path));
    let semaphore = Arc::new(Semaphore::new(config.parallel_workers));
    let timeout = config.document_timeout();
    let bar = progress.then(|| create_progress_bar(dumps.len() as u64));

    let mut reports: Vec<DocumentReport> = stream::iter(dumps)
        .map(|path| {
            let writer = Arc::clone(&writer);
            let semaphore = Arc::clone(&semaphore);
            let bar = bar.clone();
            async move {
                // closed only on runtime shutdown
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return timeout_report(&path, 0);
                };
                let source_path = path.clone();
                let task = tokio::task::spawn_blocking(move || {
                    document_pipeline::process_file(&path, &writer)
                });
                let report = match tokio::time::timeout(timeout, task).await {
                    Ok(Ok(report)) => report,
                    Ok(Err(join_error)) => {
                        warn!("worker panicked: {}", join_error);
                        failure_report(&source_path, join_error.to_string())
                    }
                    Err(_) => timeout_report(&source_path, timeout.as_secs()),
                };
                if let Some(bar) = &bar {
                    bar.set_message(report.source_id.clone());
                    bar.inc(1);
                }
                report
            }
        })
        .buffer_unordered(config.parallel_workers)
        .collect()
        .await;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    // deterministic report order regardless of completion order
    reports.sort_by(|a, b| a.source_id.cmp(&b.source_id));
    reports
}

fn failure_report(path: &std::path::Path, error: String) -> DocumentReport {
    DocumentReport {
        source_id: crate::app::adapters::extraction::attachment_id(path)
            .unwrap_or("unknown")
            .to_string(),
        outcome: DocumentOutcome::Failed { error },
    }
}

fn timeout_report(path: &std::path::Path, seconds: u64) -> DocumentReport {
    let source_id = crate::app::adapters::extraction::attachment_id(path)
        .unwrap_or("unknown")
        .to_string();
    let error = Error::Timeout {
        source_id: source_id.clone(),
        seconds,
    };
    DocumentReport {
        source_id,
        outcome: DocumentOutcome::Failed {
            error: error.to_string(),
        },
    }
}
