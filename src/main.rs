//! envread CLI
//!
//! Checks that a service's environment supplies the variables it needs,
//! printing what was resolved with secrets masked.

use anyhow::Result;
use clap::Parser;
use envread::cli::check::{render, run_check};
use envread::cli::obfuscate::run_obfuscate;
use envread::cli::{Cli, Command};
use envread::logging;
use envread::reader;
use std::process::ExitCode;
use tracing::{debug, warn};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_subscriber(cli.verbose)?;

    match cli.command {
        Command::Check(args) => {
            let outcome = run_check(&args, reader::global())?;
            println!("{}", render(&outcome)?);

            if outcome.missing {
                warn!(
                    errors = outcome.errors.len(),
                    "Some required env vars were missing"
                );
                return Ok(ExitCode::FAILURE);
            }
            debug!("all requested env vars resolved");
        }
        Command::Obfuscate(args) => {
            println!("{}", run_obfuscate(&args));
        }
    }

    Ok(ExitCode::SUCCESS)
}
