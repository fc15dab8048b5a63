//! # Error Handling
//!
//! Centralized error type for `keyed-sync`, built with `thiserror`.
//!
//! Absence is not an error in this crate: looking up a missing key returns
//! `None` and removing a missing key returns `false`. The variants below
//! cover the failures that callers genuinely have to handle:
//!
//! - Index-based list primitives called with an index past the end.
//! - An item that is already borrowed when the collection needs to update it.
//! - Failures raised by an item's own `copy_from` implementation.
//! - Table reader misuse (bad field index, no current row).
//! - Record file and configuration parsing problems.
//! - Lifecycle units that fail to start or stop.
//! - Wrapped I/O, YAML and JSON errors.

use thiserror::Error;

/// Main error type for keyed-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// An index-based list primitive was given an index outside the sequence.
    #[error("Index out of range: {index} (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// An item could not be borrowed because another borrow is still live.
    ///
    /// Collections hand out shared handles, so a caller holding a `RefMut`
    /// across a reconciliation will trip this instead of panicking.
    #[error("Item {key} is already borrowed")]
    ItemBorrowed { key: String },

    /// An item's `copy_from` implementation refused the update.
    #[error("Item update error for {key}: {message}")]
    ItemUpdate { key: String, message: String },

    /// A table reader was asked for a field that the schema does not define.
    #[error("Field index out of range: {index} (field count {count})")]
    FieldIndex { index: usize, count: usize },

    /// A table reader value was requested before `read()` or after the end.
    #[error("No current row: call read() before accessing field values")]
    NoCurrentRow,

    /// A record line could not be parsed.
    #[error("Record parse error on line {line}: {message}")]
    RecordParse { line: usize, message: String },

    /// An error occurred while parsing the `.keyed-sync.yaml` configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An error occurred while opening, reading or writing a file.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// A lifecycle unit failed to start or stop.
    #[error("Lifecycle error: {unit} - {message}")]
    Lifecycle { unit: String, message: String },

    /// An error indicating that a mutex or other lock has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
