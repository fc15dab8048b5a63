//! Show command implementation
//!
//! Loads a record file and prints it as a table, in file order.

use anyhow::{Context, Result};
use clap::Args;
use keyed_sync::config::OutputFormat;
use keyed_sync::output::{render_json, render_text, OutputConfig};
use keyed_sync::record::{load_records, Record};
use std::path::PathBuf;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Record file to print
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "KEYED_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(short, long, value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Separator between key and value
    #[arg(short, long)]
    pub delimiter: Option<String>,
}

/// Execute the show command
pub fn execute(args: ShowArgs, output: &OutputConfig) -> Result<()> {
    print!("{}", run(&args, output)?);
    Ok(())
}

/// Render the table for `args.file`
pub fn run(args: &ShowArgs, output: &OutputConfig) -> Result<String> {
    let config = super::resolve_config(
        args.config.as_deref(),
        args.format.as_deref(),
        args.delimiter.as_deref(),
    )?;

    let records = load_records(&args.file, &config.delimiter)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let rows = records.cloned_items()?;
    let schema = Record::table_schema();
    let mut reader = schema.reader(rows.iter());

    Ok(match config.format {
        OutputFormat::Text => render_text(&mut reader, output)?,
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&render_json(&mut reader)?)?),
    })
}
