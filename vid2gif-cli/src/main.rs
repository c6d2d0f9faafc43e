// vid2gif-cli/src/main.rs
//
// Entry point for the vid2gif command-line tool.
//
// Parses arguments, sets up logging on stderr, runs the conversion and turns
// any error into a single `Error: ...` line with exit status 1.

use clap::Parser;
use console::style;
use std::process;
use vid2gif::error::{FAILURE_EXIT_CODE, error_line};
use vid2gif::{Cli, logging, run_convert};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose || cli.dry_run);

    if let Err(e) = run_convert(&cli) {
        eprintln!(
            "{} {}",
            style("Error:").for_stderr().red().bold(),
            error_line(&e)
        );
        process::exit(FAILURE_EXIT_CODE);
    }
}
