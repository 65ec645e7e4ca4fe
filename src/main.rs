use clap::Parser;
use nav_extractor::NavError;
use nav_extractor::cli::{self, Args};
use std::process;

fn main() {
    let args = Args::parse();

    // Create async runtime and run the extraction with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = cli::run(args) => result,
            _ = cli::shutdown_signal(tokio::signal::ctrl_c()) => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(NavError::Interrupted {
                    reason: "Processing interrupted by user".to_string(),
                }
                .into())
            }
        }
    });

    match result {
        Ok(_report) => {
            // Summary has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
