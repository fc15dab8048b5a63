//! Key/value records stored one per line
//!
//! Record files are plain text:
//!
//! ```text
//! # comment lines and blank lines are ignored
//! AAPL,189.30
//! MSFT,402.10
//! ```
//!
//! Each line splits at the first delimiter into a key and a value, both
//! trimmed. The value may itself contain the delimiter.

use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::Serialize;

use crate::collection::KeyedCollection;
use crate::error::{Error, Result};
use crate::item::{shared, CopyFrom, Keyed};
use crate::lines::read_lines;
use crate::table::{FieldType, FieldValue, TableSchema};

/// A keyed string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub key: String,
    pub value: String,
}

impl Record {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Parse one line. `line_number` is 1-based and only used in errors.
    ///
    /// Returns `Ok(None)` for blank and comment lines.
    pub fn parse_line(line: &str, delimiter: &str, line_number: usize) -> Result<Option<Self>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let (key, value) = trimmed
            .split_once(delimiter)
            .ok_or_else(|| Error::RecordParse {
                line: line_number,
                message: format!("missing delimiter '{}'", delimiter),
            })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(Error::RecordParse {
                line: line_number,
                message: "empty key".to_string(),
            });
        }

        Ok(Some(Self::new(key, value.trim())))
    }

    pub fn to_line(&self, delimiter: &str) -> String {
        format!("{}{}{}", self.key, delimiter, self.value)
    }

    /// `key` and `value` columns.
    pub fn table_schema() -> TableSchema<Record> {
        TableSchema::new()
            .field("key", FieldType::Text, |r: &Record| {
                FieldValue::from(r.key.as_str())
            })
            .field("value", FieldType::Text, |r: &Record| {
                FieldValue::from(r.value.as_str())
            })
    }
}

impl Keyed for Record {
    type Key = String;

    fn key(&self) -> &String {
        &self.key
    }
}

impl CopyFrom for Record {
    fn copy_from(&mut self, other: &Self) -> Result<()> {
        self.value.clone_from(&other.value);
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}

/// Load a record file into a keyed collection, in file order.
///
/// A key that appears twice is kept twice in the list while the index
/// points at the later record; each such line is logged as a warning.
///
/// # Errors
///
/// Fails on the first unreadable or unparsable line.
pub fn load_records<P: AsRef<Path>>(path: P, delimiter: &str) -> Result<KeyedCollection<Record>> {
    let path = path.as_ref();
    let mut records = KeyedCollection::new();

    for (number, line) in read_lines(path)?.enumerate() {
        let line_number = number + 1;
        let Some(record) = Record::parse_line(&line?, delimiter, line_number)? else {
            continue;
        };
        if records.contains_key(&record.key) {
            warn!(
                "duplicate key '{}' on line {} of {}",
                record.key,
                line_number,
                path.display()
            );
        }
        records.add(shared(record))?;
    }

    debug!("loaded {} record(s) from {}", records.len(), path.display());
    Ok(records)
}

/// Write records to `path`, one per line, replacing the file.
pub fn write_records<'a, P, I>(path: P, records: I, delimiter: &str) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Record>,
{
    let path = path.as_ref();
    let mut content = String::new();
    for record in records {
        content.push_str(&record.to_line(delimiter));
        content.push('\n');
    }

    fs::write(path, content).map_err(|e| Error::Filesystem {
        message: format!("Failed to write {}: {}", path.display(), e),
    })
}
