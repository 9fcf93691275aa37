use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use ossim_core::{Configuration, Event, EventSink, LogTarget, MultiSink};

use crate::error::CliError;

/// Writes each event to stdout, one line per event.
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn record(&mut self, event: &Event) {
        println!("{event}");
    }
}

/// Appends each event as a line to a file, matching spec.md §6's "UTF-8,
/// LF-terminated" log file contract.
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    /// Opens the log file for appending, creating it if absent. spec.md
    /// §4.7's sink policy is "append to configured path", not "replace
    /// it" — a pre-existing log from an earlier run must not be
    /// truncated.
    pub fn create(path: &Path) -> Result<Self, CliError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(CliError::LogOpenFailure)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl EventSink for FileSink {
    fn record(&mut self, event: &Event) {
        // The event trace is short-lived and this is the CLI's only sink
        // writer; a failed line write has nowhere further to propagate to
        // without threading a fallible `record` through `ossim-core`'s
        // sink trait, so it is reported to stderr instead of silently
        // dropped.
        if let Err(err) = writeln!(self.writer, "{event}") {
            eprintln!("warning: failed to write log line: {err}");
        }
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Build the sink (or pair of sinks) `config.log_target` names.
pub fn build_sink(config: &Configuration) -> Result<Box<dyn EventSink>, CliError> {
    match config.log_target {
        LogTarget::Monitor => Ok(Box::new(ConsoleSink)),
        LogTarget::File => Ok(Box::new(FileSink::create(&config.log_path)?)),
        LogTarget::Both => {
            let file = FileSink::create(&config.log_path)?;
            Ok(Box::new(MultiSink::new(vec![
                Box::new(ConsoleSink),
                Box::new(file),
            ])))
        }
    }
}
