use crate::config::schema::{RuleConfig, ValidationError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Failure to turn a rule file into a [`RuleConfig`]. Errors from
/// [`load_from_path`] carry the file they came from.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read rule file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule file TOML{}: {source}", origin(.path))]
    Toml {
        path: Option<PathBuf>,
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("invalid rule file{}: {source}", origin(.path))]
    Validation {
        path: Option<PathBuf>,
        #[source]
        source: ValidationError,
    },
}

/// ` (<path>)` when the input came from a file.
fn origin(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(|path| format!(" ({})", path.display()))
        .unwrap_or_default()
}

/// Parse and validate rule-file contents.
pub fn load_from_str(input: &str) -> Result<RuleConfig, ConfigError> {
    parse(input, None)
}

/// Read, parse and validate the rule file at `path`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RuleConfig, ConfigError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&input, Some(path))
}

fn parse(input: &str, path: Option<&Path>) -> Result<RuleConfig, ConfigError> {
    let owned_path = || path.map(Path::to_path_buf);

    let config: RuleConfig = toml_edit::de::from_str(input).map_err(|source| ConfigError::Toml {
        path: owned_path(),
        source,
    })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation {
            path: owned_path(),
            source,
        })?;

    debug!(
        name = %config.meta.name,
        rules = config.rules.len(),
        path = ?path,
        "loaded rule config"
    );
    Ok(config)
}
