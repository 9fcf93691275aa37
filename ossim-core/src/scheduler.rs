use std::cmp::Reverse;

use crate::config::Discipline;
use crate::process::Process;

/// The ready queue, parameterized by discipline rather than implemented
/// as five separate queue types: admission and readmission always push
/// to the tail, and `next` picks which index to dispatch by a
/// discipline-specific key. FIFO and Round Robin share the same
/// arrival-order behavior because both always operate on index 0; they
/// differ only in how the executor treats the operation it pops (RR
/// truncates to a quantum, FIFO runs it to completion).
#[derive(Debug, Clone)]
pub struct Scheduler {
    discipline: Discipline,
    ready: Vec<Process>,
}

impl Scheduler {
    pub fn new(discipline: Discipline) -> Self {
        Self {
            discipline,
            ready: Vec::new(),
        }
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    pub fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ready.len()
    }

    /// Admit a newly-loaded or re-injected process. Always appended to
    /// the tail; ordering among ready processes is entirely the job of
    /// `next`.
    pub fn admit(&mut self, process: Process) {
        self.ready.push(process);
    }

    /// Push a preempted process back into the ready set. Identical to
    /// `admit` today (every discipline re-sorts or re-scans on `next`
    /// anyway), kept as its own name because it is the operation the
    /// round-robin quantum and operation-truncation paths call, as
    /// opposed to first admission or interrupt-driven injection.
    pub fn readmit(&mut self, process: Process) {
        self.ready.push(process);
    }

    /// Clone the current ready-set frontier, in insertion order — `next`
    /// never reorders the backing `Vec`, it only removes by a computed
    /// index, so this is arrival order regardless of discipline. Used
    /// once at start-up by the process loader to capture the template it
    /// re-injects every 100 ms, before any process has been removed from
    /// the ready set.
    pub fn snapshot(&self) -> Vec<Process> {
        self.ready.clone()
    }

    /// Remove and return the next process to dispatch, per discipline:
    ///
    /// - FIFO / Round Robin: arrival order (the head of the queue).
    /// - Priority: descending `io_count`, ties broken by pid.
    /// - SJF: ascending `task_count`, ties broken by pid.
    /// - STR: ascending remaining duration, ties broken by pid —
    ///   recomputed fresh each call, since a round-robin-style
    ///   truncation shrinks a process's remaining duration in place.
    pub fn next(&mut self) -> Option<Process> {
        if self.ready.is_empty() {
            return None;
        }
        let index = match self.discipline {
            Discipline::Fifo | Discipline::RoundRobin => 0,
            Discipline::Priority => self
                .ready
                .iter()
                .enumerate()
                .min_by_key(|(_, p)| (Reverse(p.io_count), p.pid))
                .map(|(i, _)| i)
                .expect("checked non-empty above"),
            Discipline::Sjf => self
                .ready
                .iter()
                .enumerate()
                .min_by_key(|(_, p)| (p.task_count, p.pid))
                .map(|(i, _)| i)
                .expect("checked non-empty above"),
            Discipline::Str => self
                .ready
                .iter()
                .enumerate()
                .min_by_key(|(_, p)| (p.remaining_duration_ms(), p.pid))
                .map(|(i, _)| i)
                .expect("checked non-empty above"),
        };
        Some(self.ready.remove(index))
    }
}
