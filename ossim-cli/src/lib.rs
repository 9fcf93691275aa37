//! Library half of the `ossim` binary: config/workload loading, sink
//! wiring, and the top-level run function `main.rs` calls into. Split out
//! so integration tests can exercise the CLI's behavior without shelling
//! out to the compiled binary.

pub mod error;
pub mod sinks;
pub mod tracing_init;

use std::path::Path;

use error::CliError;
use ossim_core::Simulation;

/// Load config + workload, wire the configured sink(s), and run the
/// simulation to completion. Returns the same error taxonomy spec.md §7
/// names; `main` maps any `Err` to a non-zero exit code.
pub fn run(config_path: &Path) -> Result<(), CliError> {
    let config = ossim_config::load_from_path(config_path)?;
    tracing::info!(
        discipline = ?config.discipline,
        workload = %config.workload_path.display(),
        "configuration loaded"
    );

    let processes = ossim_workload::load_from_path(&config.workload_path, &config)?;
    tracing::info!(process_count = processes.len(), "workload loaded");

    let sink = sinks::build_sink(&config)?;
    let simulation = Simulation::new(config, processes, sink);
    simulation.run();
    Ok(())
}
