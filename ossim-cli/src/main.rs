//! Binary entry point: parses one positional argument (the configuration
//! file path) and hands off to `ossim_cli::run`. Matching spec.md §6: no
//! flags, no subcommands.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// OS process scheduling simulator.
#[derive(Parser, Debug)]
#[command(name = "ossim", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    config_path: PathBuf,
}

fn main() -> ExitCode {
    ossim_cli::tracing_init::init_tracing();
    let cli = Cli::parse();
    match ossim_cli::run(&cli.config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ossim: {err}");
            ExitCode::FAILURE
        }
    }
}
