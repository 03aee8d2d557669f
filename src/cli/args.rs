//! Command-line argument definitions.
//!
//! The CLI surface is defined with the clap derive API: a `process`
//! command running the batch, and a `verify` command re-running the JSON
//! integer check against an existing output directory.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// CLI arguments for the attachment table processor
#[derive(Debug, Clone, Parser)]
#[command(
    name = "beilage-processor",
    version,
    about = "Parse and normalize tabular attachments of parliamentary answer documents",
    long_about = "Processes the table extraction dumps of parliamentary answer attachments \
                  (Beilagen) into normalized CSV and JSON output pairs. Handles the Austrian \
                  number format, explicit null sentinels, carried-over row state and the \
                  known layout quirks of each attachment."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process a directory of extraction dumps into output pairs
    Process(ProcessArgs),
    /// Re-run the integer serialization check on written JSON outputs
    Verify(VerifyArgs),
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Directory holding the extraction dumps (`<AttachmentId>.json`)
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input_path: PathBuf,

    /// Directory receiving the output file pairs and the run log
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "./output")]
    pub output_path: PathBuf,

    /// Number of documents processed concurrently (defaults to CPU count)
    #[arg(short = 'w', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Per-document timeout in seconds
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Suppress progress output, log warnings and errors only
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl ProcessArgs {
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(0) = self.workers {
            return Err(Error::configuration("--workers must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::configuration("--timeout-secs must be at least 1"));
        }
        Ok(())
    }
}

/// Arguments for the verify command
#[derive(Debug, Clone, Parser)]
pub struct VerifyArgs {
    /// Directory holding written `_data.json` outputs
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "./output")]
    pub output_path: PathBuf,

    /// Verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl VerifyArgs {
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
