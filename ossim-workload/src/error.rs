use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong loading a workload ("meta-data") file,
/// matching spec.md §7's WorkloadNotFound/WorkloadMalformed taxonomy.
#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("workload file not found: {0}")]
    NotFound(PathBuf),

    #[error("application {pid_hint} is missing its A{{finish}} marker before S{{finish}}")]
    UnbalancedApplication { pid_hint: u32 },

    #[error("malformed workload: {0}")]
    Malformed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
