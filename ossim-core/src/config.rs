use std::path::PathBuf;

use crate::operation::OperationKind;

/// The CPU scheduling discipline named in `CPU Scheduling Code:`.
///
/// This is a single tagged choice, not five independent flags: the
/// config grammar has exactly one `CPU Scheduling Code:` line, so a run
/// is FIFO, PS, SJF, STR, or RR — never a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    Fifo,
    Priority,
    Sjf,
    Str,
    RoundRobin,
}

impl Discipline {
    pub fn requires_quantum(self) -> bool {
        matches!(self, Discipline::RoundRobin | Discipline::Str)
    }
}

/// Where the event trace is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Monitor,
    File,
    Both,
}

/// The static device-timing and scheduling configuration for one run.
///
/// This is a plain value object: `ossim-core` never parses or writes
/// it, it only consumes it. All cycle times are ms/cycle; memory sizes
/// are normalized to bytes.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub monitor_display_ms: u32,
    pub processor_cycle_ms: u32,
    pub scanner_cycle_ms: u32,
    pub hard_drive_cycle_ms: u32,
    pub keyboard_cycle_ms: u32,
    pub memory_cycle_ms: u32,
    pub projector_cycle_ms: u32,
    pub num_projectors: u32,
    pub num_hard_drives: u32,
    pub total_memory_bytes: u64,
    pub memory_block_size_bytes: u64,
    /// 0 when absent from the grammar; only meaningful (and required to
    /// be > 0) when `discipline.requires_quantum()`.
    pub quantum_ms: u32,
    pub discipline: Discipline,
    pub log_target: LogTarget,
    pub log_path: PathBuf,
    pub workload_path: PathBuf,
}

impl Configuration {
    /// The ms/cycle for the device class a given operation kind runs on.
    /// `AppStart`/`AppFinish` are markers, not timed operations, and
    /// resolve to 0.
    pub fn cycle_time_ms(&self, kind: OperationKind) -> u32 {
        match kind {
            OperationKind::ProcessorRun => self.processor_cycle_ms,
            OperationKind::MemoryAllocate | OperationKind::MemoryBlock => self.memory_cycle_ms,
            OperationKind::OutputMonitor => self.monitor_display_ms,
            OperationKind::OutputProjector => self.projector_cycle_ms,
            OperationKind::OutputHardDrive | OperationKind::InputHardDrive => {
                self.hard_drive_cycle_ms
            }
            OperationKind::InputKeyboard => self.keyboard_cycle_ms,
            OperationKind::InputScanner => self.scanner_cycle_ms,
            OperationKind::AppStart | OperationKind::AppFinish => 0,
        }
    }

    /// Validate the invariants spec.md §3 lists. Returns the first
    /// violation found as a human-readable message; callers that need
    /// every violation can call repeatedly after fixing one, same as the
    /// source's single-pass grammar checks.
    pub fn validate(&self) -> Result<(), String> {
        let cycle_times = [
            ("Monitor display time", self.monitor_display_ms),
            ("Processor cycle time", self.processor_cycle_ms),
            ("Scanner cycle time", self.scanner_cycle_ms),
            ("Hard drive cycle time", self.hard_drive_cycle_ms),
            ("Keyboard cycle time", self.keyboard_cycle_ms),
            ("Memory cycle time", self.memory_cycle_ms),
            ("Projector cycle time", self.projector_cycle_ms),
        ];
        for (name, value) in cycle_times {
            if value == 0 {
                return Err(format!("{name} must be > 0"));
            }
        }
        if self.num_projectors == 0 {
            return Err("Projector quantity must be >= 1".into());
        }
        if self.num_hard_drives == 0 {
            return Err("Hard drive quantity must be >= 1".into());
        }
        if self.discipline.requires_quantum() && self.quantum_ms == 0 {
            return Err("Processor Quantum Number must be > 0 for RR/STR".into());
        }
        if self.memory_block_size_bytes == 0
            || self.total_memory_bytes % self.memory_block_size_bytes != 0
        {
            return Err("Memory block size must divide total system memory".into());
        }
        Ok(())
    }
}
