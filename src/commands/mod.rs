//! # CLI Command Implementations
//!
//! Each subcommand of the `keyed-sync` tool lives in its own file with:
//! - An `Args` struct that defines the command-specific options, derived
//!   using `clap`.
//! - A `run` function that does the work and returns the text to print,
//!   which keeps the command testable without capturing stdout.
//! - An `execute` function that calls `run` and prints the result.

pub mod apply;
pub mod show;

use std::path::{Path, PathBuf};

use anyhow::Result;
use keyed_sync::config::{self, Config, OutputFormat};

/// Load the configuration for a command, then apply flag overrides.
pub(crate) fn resolve_config(
    config_path: Option<&Path>,
    format: Option<&str>,
    delimiter: Option<&str>,
) -> Result<Config> {
    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = config::load(config_path, &working_dir)?;

    match format {
        Some("json") => config.format = OutputFormat::Json,
        Some("text") => config.format = OutputFormat::Text,
        Some(other) => anyhow::bail!("Unknown output format: {}", other),
        None => {}
    }
    if let Some(delimiter) = delimiter {
        config.delimiter = delimiter.to_string();
    }
    Ok(config.validate()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sync.yaml");
        std::fs::write(&path, "delimiter: \";\"\nformat: json\n").unwrap();

        let config = resolve_config(Some(&path), Some("text"), Some("=")).unwrap();

        assert_eq!(config.delimiter, "=");
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_delimiter_flag_is_validated_like_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sync.yaml");
        std::fs::write(&path, "").unwrap();

        let err = resolve_config(Some(&path), None, Some("a\nb")).unwrap_err();
        assert!(err.to_string().contains("newline"));

        let err = resolve_config(Some(&path), None, Some("")).unwrap_err();
        assert!(err.to_string().contains("delimiter must not be empty"));
    }
}
