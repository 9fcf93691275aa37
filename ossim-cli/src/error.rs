use thiserror::Error;

use ossim_config::ConfigError;
use ossim_workload::WorkloadError;

/// The top-level error taxonomy spec.md §7 names: config/workload
/// loading failures plus the CLI's own log-file-open failure, all
/// surfaced to `main` and mapped to a non-zero exit code.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Workload(#[from] WorkloadError),

    #[error("could not open log file for writing: {0}")]
    LogOpenFailure(#[source] std::io::Error),
}
