//! # dx CLI
//!
//! This is the binary entry point for the `dx` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Reporting fatal errors on stderr and exiting with status 1.
//!
//! The core application logic is defined in the `lib.rs` library crate, ensuring
//! that the binary is a thin wrapper around the reusable library functionality.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let printer = cli.printer();

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            printer.error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
