//! Command implementations for the CLI.

pub mod process;
pub mod shared;
pub mod verify;

pub use shared::RunStats;

use crate::cli::args::{Args, Commands};
use crate::error::Result;

/// Dispatch to the selected subcommand
pub async fn run(args: Args) -> Result<RunStats> {
    match args.command {
        Some(Commands::Process(process_args)) => process::run_process(process_args).await,
        Some(Commands::Verify(verify_args)) => verify::run_verify(verify_args).await,
        None => unreachable!("handled by main before dispatch"),
    }
}
