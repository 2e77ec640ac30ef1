use anyhow::Context;
use clap::Parser;
use evcharge_processor::cli::{self, Args};
use std::process;

fn main() {
    let args = Args::parse();
    cli::setup_logging(&args);

    let result = cli::run(&args)
        .with_context(|| format!("Failed to process {}", args.input_path.display()));

    match result {
        Ok(_stats) => {
            // Summary already printed by the processor
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
