//! Settlement Reports CLI
//!
//! Command-line interface for reporting on buy/sell settlement instructions.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- instructions.tsv
//! cargo run < instructions.tsv
//! cargo run -- --delimiter , --on-error skip instructions.csv
//! cargo run -- --calendar calendars.toml -vv instructions.tsv
//! ```
//!
//! The program reads instruction records from the input file (or standard
//! input), finalises them, and prints three reports to stdout: amounts
//! settled every day, and entity rankings by incoming and outgoing amount.
//! Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, malformed record, invalid calendar, etc.)

use settlement_reports::cli;
use std::io;
use std::process;

fn main() {
    let args = cli::parse_args();
    cli::init_logging(args.log_level());

    let pipeline = match args.to_pipeline() {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut output = io::stdout().lock();
    let result = match &args.input_file {
        Some(path) => pipeline.process_path(path, &mut output),
        None => pipeline.process(io::stdin().lock(), &mut output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
