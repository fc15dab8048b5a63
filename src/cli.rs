//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use keyed_sync::output::OutputConfig;

use crate::commands;

/// Keyed Sync - Reconcile keyed record files in place
#[derive(Parser, Debug)]
#[command(name = "keyed-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); defaults to RUST_LOG or warn
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile a source record file into a target record file
    Apply(commands::apply::ApplyArgs),

    /// Print a record file as a table
    Show(commands::show::ShowArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(self.log_level.as_deref());
        let output = OutputConfig::from_flag(&self.color);

        match self.command {
            Commands::Apply(args) => commands::apply::execute(args, &output),
            Commands::Show(args) => commands::show::execute(args, &output),
        }
    }
}

fn init_logging(level: Option<&str>) {
    let mut builder = match level {
        Some(level) => {
            let mut builder = env_logger::Builder::new();
            builder.parse_filters(level);
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")),
    };
    // A logger may already be installed when commands run inside tests.
    let _ = builder.format_timestamp(None).try_init();
}
