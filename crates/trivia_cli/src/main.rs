//! `trivia` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and hand them to `cli::run`.
//! - Print exactly one JSON document and exit non-zero on error envelopes.

mod cli;
mod response;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    let response = cli::run(args);
    println!("{}", response.body);
    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
