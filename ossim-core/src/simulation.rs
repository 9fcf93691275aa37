use crate::clock::SimClock;
use crate::config::{Configuration, Discipline};
use crate::device::{DeviceArbiter, MemoryAllocator};
use crate::event::{Event, EventCategory, EventSink};
use crate::executor::Executor;
use crate::operation::OperationKind;
use crate::process::Process;
use crate::scheduler::Scheduler;

/// How a dispatch ended: either the process ran its `AppFinish` marker
/// and is gone for good, or it was preempted (RR quantum exhausted, or
/// an operation was truncated) and must go back to the ready queue.
enum DispatchOutcome {
    Finished,
    Preempted(Process),
}

/// Owns every piece of mutable state a run touches: the simulated
/// clock, the ready queue, the device/memory resources, the process
/// loader's injection bookkeeping, and the sink the event trace is
/// written to. `ossim-cli` constructs one of these from a parsed
/// `Configuration` and workload, then calls `run`.
pub struct Simulation<S: EventSink> {
    config: Configuration,
    scheduler: Scheduler,
    clock: SimClock,
    devices: DeviceArbiter,
    memory: MemoryAllocator,
    sink: S,
    injection_template: Vec<Process>,
    injections_remaining: u32,
    next_injection_ms: u64,
    next_pid: u32,
}

const MAX_INJECTIONS: u32 = 9;
const INJECTION_PERIOD_MS: u64 = 100;

impl<S: EventSink> Simulation<S> {
    pub fn new(config: Configuration, initial: Vec<Process>, sink: S) -> Self {
        let devices = DeviceArbiter::new(config.num_projectors, config.num_hard_drives);
        let memory = MemoryAllocator::new(config.total_memory_bytes, config.memory_block_size_bytes);
        let next_pid = initial.iter().map(|p| p.pid).max().unwrap_or(0) + 1;
        let mut scheduler = Scheduler::new(config.discipline);
        for process in initial {
            scheduler.admit(process);
        }
        let injection_template = scheduler.snapshot();
        Self {
            config,
            scheduler,
            clock: SimClock::new(),
            devices,
            memory,
            sink,
            injection_template,
            injections_remaining: MAX_INJECTIONS,
            next_injection_ms: INJECTION_PERIOD_MS,
            next_pid,
        }
    }

    /// Drive every process to completion (subject to the 100 ms
    /// injection policy) and return the sink the trace was written to.
    pub fn run(mut self) -> S {
        self.emit_global(EventCategory::SimulatorStart, "Simulator program starting");
        while let Some(process) = self.scheduler.next() {
            match self.dispatch(process) {
                DispatchOutcome::Finished => {}
                DispatchOutcome::Preempted(process) => self.scheduler.readmit(process),
            }
        }
        self.emit_global(EventCategory::SimulatorEnd, "Simulator program ending");
        self.sink
    }

    fn emit_global(&mut self, category: EventCategory, message: &str) {
        self.sink.record(&Event {
            timestamp: self.clock.timestamp(),
            pid: 0,
            category,
            message: message.to_string(),
        });
    }

    /// Run one process from dispatch until it either finishes or is
    /// preempted. Round Robin resets a fresh quantum budget at the start
    /// of every dispatch; every other discipline runs to completion or
    /// to the first truncation-worthy boundary, which in practice never
    /// happens outside RR since `budget_ms` is `None`.
    fn dispatch(&mut self, mut process: Process) -> DispatchOutcome {
        let pid = process.pid;
        let mut budget = match self.config.discipline {
            Discipline::RoundRobin => Some(self.config.quantum_ms),
            _ => None,
        };

        loop {
            let op = match process.peek_front() {
                Some(op) => *op,
                None => return DispatchOutcome::Finished,
            };

            match op.kind {
                OperationKind::AppStart => {
                    self.executor().run_marker(pid, op.kind);
                    process.pop_front();
                    self.check_injection();
                }
                OperationKind::AppFinish => {
                    self.executor().run_marker(pid, op.kind);
                    process.pop_front();
                    self.check_injection();
                    return DispatchOutcome::Finished;
                }
                _ => {
                    let (remainder, truncated) = self.executor().run_timed(pid, op, budget);
                    let consumed = op.duration_ms - remainder.duration_ms;
                    if truncated {
                        process.replace_front(remainder);
                        self.check_injection();
                        return DispatchOutcome::Preempted(process);
                    }
                    process.pop_front();
                    self.check_injection();
                    if let Some(remaining_budget) = budget.as_mut() {
                        *remaining_budget -= consumed;
                        // A process whose only remaining op is the
                        // zero-duration AppFinish marker runs it out in this
                        // same dispatch rather than being requeued for it:
                        // the quantum only ever bounds timed work, and
                        // deferring `End process` to the next dispatch round
                        // would reorder it after unrelated processes' events.
                        let only_marker_remains = match process.peek_front() {
                            None => true,
                            Some(op) => op.kind == OperationKind::AppFinish,
                        };
                        if *remaining_budget == 0 && !only_marker_remains {
                            return DispatchOutcome::Preempted(process);
                        }
                    }
                }
            }
        }
    }

    fn executor(&mut self) -> Executor<'_> {
        Executor {
            clock: &mut self.clock,
            devices: &mut self.devices,
            memory: &mut self.memory,
            sink: &mut self.sink,
        }
    }

    /// Re-admit a full copy of the initial-workload snapshot (each
    /// process with a fresh pid) for every 100 ms boundary the clock has
    /// crossed since the last check, up to the nine-firing cap. A no-op
    /// for an empty initial workload.
    fn check_injection(&mut self) {
        if self.injection_template.is_empty() {
            return;
        }
        while self.injections_remaining > 0 && self.clock.now_ms() >= self.next_injection_ms {
            for process in &self.injection_template {
                let mut clone = process.clone();
                clone.set_pid(self.next_pid);
                self.next_pid += 1;
                self.scheduler.admit(clone);
            }
            self.injections_remaining -= 1;
            self.next_injection_ms += INJECTION_PERIOD_MS;
        }
    }
}
