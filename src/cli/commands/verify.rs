//! Verify command implementation.
//!
//! Re-runs the integer serialization check against an existing output
//! directory, independent of a processing run. Useful after hand edits or
//! when outputs were produced elsewhere.

use colored::Colorize;
use tracing::info;

use super::shared::{setup_logging, RunStats};
use crate::app::services::output_writer::verify_json_integers;
use crate::app::models::WarningLog;
use crate::cli::args::VerifyArgs;
use crate::constants::JSON_OUTPUT_SUFFIX;
use crate::error::{Error, Result};

pub async fn run_verify(args: VerifyArgs) -> Result<RunStats> {
    setup_logging(args.log_level());

    let mut outputs: Vec<_> = std::fs::read_dir(&args.output_path)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(JSON_OUTPUT_SUFFIX))
        })
        .collect();
    outputs.sort();

    if outputs.is_empty() {
        return Err(Error::configuration(format!(
            "no {} files found in {}",
            JSON_OUTPUT_SUFFIX,
            args.output_path.display()
        )));
    }

    let mut stats = RunStats::default();
    let mut warnings = WarningLog::new();
    for path in &outputs {
        let findings = verify_json_integers(path, &mut warnings)?;
        stats.documents_processed += 1;
        stats.warnings_logged += findings;
        if findings == 0 {
            println!("  {} {}", "ok".green(), path.display());
        } else {
            println!(
                "  {} {} ({} widened values)",
                "WARN".yellow().bold(),
                path.display(),
                findings
            );
        }
    }

    info!(
        "Verified {} files, {} findings",
        stats.documents_processed, stats.warnings_logged
    );
    Ok(stats)
}
