use tracing_subscriber::EnvFilter;

/// Initialize the `tracing` subscriber for internal diagnostics — config
/// parsing, workload parsing, and scheduler dispatch decisions. This is
/// wholly separate from the simulated event trace spec.md §4.7 defines:
/// that trace is the program's actual output and goes through
/// [`ossim_core::EventSink`], never through `tracing`.
///
/// Level is controlled by the `OSSIM_LOG` environment variable
/// (`error`/`warn`/`info`/`debug`/`trace`), defaulting to `info`, the way
/// the teacher's CLI reads its own trace-level environment variable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("OSSIM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();
}
