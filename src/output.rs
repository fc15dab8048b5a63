//! # Output Rendering
//!
//! Turns tables and change logs into text for the terminal or JSON for
//! other programs.
//!
//! ## Color
//!
//! Color follows the `--color` flag:
//! - `always` forces color on, `never` forces it off.
//! - `auto` defers to the `console` crate, which honours `NO_COLOR`,
//!   `CLICOLOR`, `CLICOLOR_FORCE` and TTY detection.
//!
//! JSON output is never colored.

use std::borrow::Borrow;

use console::style;
use serde_json::{json, Map, Value};

use crate::change::ListChange;
use crate::error::Result;
use crate::reconcile::ReconcileSummary;
use crate::table::TableReader;

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in text output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from the value of the `--color` flag.
    pub fn from_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => console::colors_enabled(),
        };
        console::set_colors_enabled(use_color);

        Self { use_color }
    }

    /// Create a configuration with colors always disabled.
    pub fn plain() -> Self {
        Self { use_color: false }
    }
}

/// Render every remaining row of `reader` as an aligned text table.
///
/// The header row is followed by a rule; columns are padded to the widest
/// cell. The reader is consumed to the end.
pub fn render_text<T, I>(reader: &mut TableReader<'_, T, I>, config: &OutputConfig) -> Result<String>
where
    I: Iterator,
    I::Item: Borrow<T>,
{
    let mut header = Vec::with_capacity(reader.field_count());
    for i in 0..reader.field_count() {
        header.push(reader.field_name(i)?.to_string());
    }

    let mut rows = Vec::new();
    while reader.read() {
        rows.push(
            reader
                .values()?
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
        );
    }

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_line = pad_row(&header, &widths);
    if config.use_color {
        out.push_str(&style(header_line).bold().to_string());
    } else {
        out.push_str(&header_line);
    }
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&pad_row(&rule, &widths));
    out.push('\n');

    for row in &rows {
        out.push_str(&pad_row(row, &widths));
        out.push('\n');
    }
    Ok(out)
}

/// Render every remaining row of `reader` as a JSON array of objects.
pub fn render_json<T, I>(reader: &mut TableReader<'_, T, I>) -> Result<Value>
where
    I: Iterator,
    I::Item: Borrow<T>,
{
    let mut names = Vec::with_capacity(reader.field_count());
    for i in 0..reader.field_count() {
        names.push(reader.field_name(i)?.to_string());
    }

    let mut rows = Vec::new();
    while reader.read() {
        let mut object = Map::new();
        for (name, value) in names.iter().zip(reader.values()?) {
            object.insert(name.clone(), serde_json::to_value(value)?);
        }
        rows.push(Value::Object(object));
    }
    Ok(Value::Array(rows))
}

/// One line per change, `+` for additions, `-` for removals, `~` for updates.
pub fn render_changes(changes: &[ListChange], config: &OutputConfig) -> String {
    let mut out = String::new();
    for change in changes {
        let line = change.to_string();
        let line = if config.use_color {
            match change {
                ListChange::Added { .. } => style(line).green().to_string(),
                ListChange::Removed { .. } => style(line).red().to_string(),
                ListChange::ItemChanged { .. } => style(line).yellow().to_string(),
                ListChange::Reset => style(line).magenta().to_string(),
            }
        } else {
            line
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// JSON document combining the reconciled rows, the summary and optionally the changes.
pub fn reconcile_json(
    rows: Value,
    summary: &ReconcileSummary,
    changes: Option<&[ListChange]>,
) -> Result<Value> {
    let mut doc = json!({
        "summary": serde_json::to_value(summary)?,
        "records": rows,
    });
    if let Some(changes) = changes {
        doc["changes"] = serde_json::to_value(changes)?;
    }
    Ok(doc)
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    padded.join("  ").trim_end().to_string()
}
