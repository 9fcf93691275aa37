use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong loading a configuration file, matching
/// spec.md §7's ConfigNotFound/ConfigMalformed taxonomy.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("malformed configuration: {0}")]
    Malformed(String),

    #[error("configuration failed validation: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
