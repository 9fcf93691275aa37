use crate::clock::SimClock;
use crate::device::{DeviceArbiter, MemoryAllocator};
use crate::event::{Event, EventCategory, EventSink};
use crate::operation::{Operation, OperationKind};

/// Borrowed access to everything a single operation's execution can
/// touch. Built fresh per call from `Simulation`'s owned state — it
/// exists so the per-operation message/resource/clock logic reads as
/// one unit instead of being spread across `Simulation`'s methods.
pub struct Executor<'a> {
    pub clock: &'a mut SimClock,
    pub devices: &'a mut DeviceArbiter,
    pub memory: &'a mut MemoryAllocator,
    pub sink: &'a mut dyn EventSink,
}

impl<'a> Executor<'a> {
    fn emit(&mut self, pid: u32, category: EventCategory, message: String) {
        self.sink.record(&Event {
            timestamp: self.clock.timestamp(),
            pid,
            category,
            message,
        });
    }

    /// `AppStart` emits its two preparing/starting lines back to back at
    /// the current timestamp; `AppFinish` emits its single line. Neither
    /// advances the clock.
    pub fn run_marker(&mut self, pid: u32, kind: OperationKind) {
        match kind {
            OperationKind::AppStart => {
                self.emit(
                    pid,
                    EventCategory::AppStart,
                    format!("OS: preparing process {pid}"),
                );
                self.emit(
                    pid,
                    EventCategory::AppStart,
                    format!("OS: starting process {pid}"),
                );
            }
            OperationKind::AppFinish => {
                self.emit(pid, EventCategory::AppFinish, format!("End process {pid}"));
            }
            other => panic!("run_marker called with non-marker kind {other:?}"),
        }
    }

    /// Run a timed operation for up to `budget_ms` (no limit outside
    /// Round Robin). Resolves the operation's device index / memory
    /// address on first touch and reuses it on every later slice of the
    /// same logical operation. Returns the operation with its remaining
    /// duration, and whether it was truncated (remaining duration > 0).
    pub fn run_timed(&mut self, pid: u32, mut op: Operation, budget_ms: Option<u32>) -> (Operation, bool) {
        if op.kind.has_resource() && !op.resolved {
            op.resource_id = if op.kind == OperationKind::MemoryAllocate {
                self.memory.allocate()
            } else {
                self.devices.next_index(op.kind)
            };
            op.resolved = true;
        }

        let slice = match budget_ms {
            Some(budget) if budget < op.duration_ms => budget,
            _ => op.duration_ms,
        };

        let (start_msg, end_msg) = operation_messages(pid, op);
        self.emit(pid, EventCategory::OperationStart, start_msg);
        self.clock.advance(slice);
        self.emit(pid, EventCategory::OperationEnd, end_msg);

        op.duration_ms -= slice;
        let truncated = op.duration_ms > 0;
        if truncated {
            self.emit(
                pid,
                EventCategory::Interrupted,
                "******* Process was interrupted *******".to_string(),
            );
        }
        (op, truncated)
    }
}

/// The start/end message pair for a timed operation, per its kind and
/// (if resolved) its device index or memory address.
fn operation_messages(pid: u32, op: Operation) -> (String, String) {
    match op.kind {
        OperationKind::ProcessorRun => (
            format!("Process {pid}: start processing action"),
            format!("Process {pid}: end processing action"),
        ),
        OperationKind::MemoryAllocate => (
            format!("Process {pid}: allocating memory"),
            format!(
                "Process {pid}: memory allocated at {}",
                MemoryAllocator::format_address(op.resource_id)
            ),
        ),
        OperationKind::MemoryBlock => (
            format!("Process {pid}: start memory blocking"),
            format!("Process {pid}: end memory blocking"),
        ),
        OperationKind::OutputMonitor => (
            format!("Process {pid}: start monitor output"),
            format!("Process {pid}: end monitor output"),
        ),
        OperationKind::OutputProjector => (
            format!(
                "Process {pid}: start projector output on PROJ {}",
                op.resource_id
            ),
            format!(
                "Process {pid}: end projector output on PROJ {}",
                op.resource_id
            ),
        ),
        OperationKind::OutputHardDrive => (
            format!(
                "Process {pid}: start hard drive output on HDD {}",
                op.resource_id
            ),
            format!(
                "Process {pid}: end hard drive output on HDD {}",
                op.resource_id
            ),
        ),
        OperationKind::InputKeyboard => (
            format!("Process {pid}: start keyboard input"),
            format!("Process {pid}: end keyboard input"),
        ),
        OperationKind::InputHardDrive => (
            format!(
                "Process {pid}: start hard drive input on HDD {}",
                op.resource_id
            ),
            format!(
                "Process {pid}: end hard drive input on HDD {}",
                op.resource_id
            ),
        ),
        OperationKind::InputScanner => (
            format!("Process {pid}: start scanner input"),
            format!("Process {pid}: end scanner input"),
        ),
        OperationKind::AppStart | OperationKind::AppFinish => {
            panic!("run_timed called with a marker kind")
        }
    }
}
