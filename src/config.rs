//! # Configuration Parsing
//!
//! This module defines the `.keyed-sync.yaml` configuration file and the
//! logic for loading it. Every setting has a default, so an empty file or no
//! file at all is valid.
//!
//! ```yaml
//! # Remove target records whose key is missing from the source
//! delete_non_matching: true
//! # Separator between key and value in record files
//! delimiter: ","
//! # Output format for tables: text or json
//! format: text
//! ```
//!
//! ## Lookup Order
//!
//! [`locate`] picks the file to load:
//!
//! 1.  An explicit path (the `--config` flag or `KEYED_SYNC_CONFIG`).
//! 2.  `.keyed-sync.yaml` in the working directory, if it exists.
//! 3.  Otherwise no file, and [`Config::default`] applies.
//!
//! Command-line flags override whatever the file says.

use crate::error::{Error, Result};
use crate::reconcile::ReconcileOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".keyed-sync.yaml";

/// Table output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings for loading, reconciling and printing record files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remove target records whose key is missing from the source.
    pub delete_non_matching: bool,
    /// Separator between key and value in record files.
    pub delimiter: String,
    /// Output format for tables.
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delete_non_matching: true,
            delimiter: ",".to_string(),
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            delete_non_matching: self.delete_non_matching,
        }
    }

    /// Reject settings that cannot describe a record file.
    pub fn validate(self) -> Result<Self> {
        if self.delimiter.is_empty() {
            return Err(Error::ConfigParse {
                message: "delimiter must not be empty".to_string(),
                hint: Some("Use a separator such as \",\" or \"=\"".to_string()),
            });
        }
        if self.delimiter.contains('\n') {
            return Err(Error::ConfigParse {
                message: "delimiter must not contain a newline".to_string(),
                hint: None,
            });
        }
        Ok(self)
    }
}

/// Parse a YAML string into a `Config`.
///
/// An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Config> {
    if yaml_content.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(
            "Valid keys are delete_non_matching, delimiter and format".to_string(),
        ),
    })?;
    config.validate()
}

/// Parse a `Config` from a YAML file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Choose the configuration file to load, if any.
pub fn locate(explicit: Option<&Path>, working_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = working_dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Load the configuration that [`locate`] picks, or the defaults.
///
/// # Errors
///
/// An explicit path that does not exist is an error; a missing default
/// file is not.
pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<Config> {
    match locate(explicit, working_dir) {
        Some(path) => {
            if !path.exists() {
                return Err(Error::ConfigParse {
                    message: format!("Configuration file not found: {}", path.display()),
                    hint: None,
                });
            }
            log::debug!("loading configuration from {}", path.display());
            from_file(&path)
        }
        None => Ok(Config::default()),
    }
}
