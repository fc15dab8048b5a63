//! Apply command implementation
//!
//! The apply command reconciles a source record file into a target file:
//! 1. Load configuration and apply flag overrides
//! 2. Load both record files
//! 3. Merge the source into the target in place
//! 4. Print the resulting table, the summary and optionally the change log
//! 5. Optionally write the reconciled records back to the target file

use anyhow::{Context, Result};
use clap::Args;
use keyed_sync::change::ChangeLog;
use keyed_sync::config::OutputFormat;
use keyed_sync::output::{reconcile_json, render_changes, render_json, render_text, OutputConfig};
use keyed_sync::reconcile::{self, ReconcileOptions};
use keyed_sync::record::{load_records, write_records, Record};
use log::info;
use std::path::PathBuf;

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Live record file to update
    #[arg(short, long, value_name = "FILE")]
    pub target: PathBuf,

    /// Authoritative record file to merge in
    #[arg(short, long, value_name = "FILE")]
    pub source: PathBuf,

    /// Keep target records whose key is missing from the source
    #[arg(short, long)]
    pub keep_missing: bool,

    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "KEYED_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(short, long, value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Separator between key and value
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Also print every list change the merge produced
    #[arg(long)]
    pub changes: bool,

    /// Write the reconciled records back to the target file
    #[arg(short, long)]
    pub write: bool,
}

/// Execute the apply command
pub fn execute(args: ApplyArgs, output: &OutputConfig) -> Result<()> {
    print!("{}", run(&args, output)?);
    Ok(())
}

/// Reconcile and render; writes the target file when `--write` is set
pub fn run(args: &ApplyArgs, output: &OutputConfig) -> Result<String> {
    let config = super::resolve_config(
        args.config.as_deref(),
        args.format.as_deref(),
        args.delimiter.as_deref(),
    )?;
    let options = if args.keep_missing {
        ReconcileOptions::keep_missing()
    } else {
        config.reconcile_options()
    };

    let mut target = load_records(&args.target, &config.delimiter)
        .with_context(|| format!("Failed to load target {}", args.target.display()))?;
    let source = load_records(&args.source, &config.delimiter)
        .with_context(|| format!("Failed to load source {}", args.source.display()))?;

    let log = ChangeLog::new();
    target.subscribe(log.observer());
    let summary = reconcile::apply_changes(&mut target, &source, options)?;
    let changes = log.take();

    let rows = target.cloned_items()?;
    if args.write {
        write_records(&args.target, &rows, &config.delimiter)?;
        info!("wrote {} record(s) to {}", rows.len(), args.target.display());
    }

    let schema = Record::table_schema();
    let mut reader = schema.reader(rows.iter());

    let rendered = match config.format {
        OutputFormat::Text => {
            let mut out = render_text(&mut reader, output)?;
            out.push('\n');
            out.push_str(&summary.to_string());
            out.push('\n');
            if args.changes {
                out.push('\n');
                out.push_str(&render_changes(&changes, output));
            }
            out
        }
        OutputFormat::Json => {
            let rows = render_json(&mut reader)?;
            let doc = reconcile_json(rows, &summary, args.changes.then_some(changes.as_slice()))?;
            format!("{}\n", serde_json::to_string_pretty(&doc)?)
        }
    };
    Ok(rendered)
}
