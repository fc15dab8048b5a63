//! # Keyed Sync CLI
//!
//! This is the binary entry point for the `keyed-sync` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and color output from the global flags.
//! - Executing the appropriate command and turning errors into an exit code.
//!
//! The reconciliation logic lives in the `keyed_sync` library crate; the
//! binary is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
