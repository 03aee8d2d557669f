use clap::Parser;
use std::process;

use beilage_processor::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();

    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(stats) => {
            // a non-zero exit is reserved for hard document failures;
            // warnings alone exit cleanly
            if stats.any_failed() {
                process::exit(1);
            }
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information when no subcommand is provided
fn show_help_and_commands() {
    println!("Beilage Processor - Parliamentary Answer Table Normalizer");
    println!("=========================================================");
    println!();
    println!("Parse the table extraction dumps of parliamentary answer attachments");
    println!("into normalized CSV and JSON output pairs.");
    println!();
    println!("USAGE:");
    println!("    beilage-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Process a directory of extraction dumps (main command)");
    println!("    verify      Re-check written JSON outputs for widened integers");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Process all dumps in ./dumps into ./output:");
    println!("    beilage-processor process --input ./dumps --output ./output");
    println!();
    println!("    # Re-verify an existing output directory:");
    println!("    beilage-processor verify --output ./output");
    println!();
    println!("For detailed help on any command, use:");
    println!("    beilage-processor <COMMAND> --help");
}
