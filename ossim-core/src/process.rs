use std::collections::VecDeque;

use crate::operation::{Operation, OperationKind};

/// One application's worth of work: an ordered, consumable queue of
/// [`Operation`]s bracketed by `AppStart` and `AppFinish`, plus the two
/// derived counts the schedulers key off of.
#[derive(Debug, Clone)]
pub struct Process {
    pub pid: u32,
    ops: VecDeque<Operation>,
    pub io_count: u32,
    pub task_count: u32,
}

impl Process {
    /// Build a process from its full operation list (start marker first,
    /// finish marker last). `io_count` and `task_count` are derived once
    /// here, not recomputed as operations are consumed.
    pub fn new(pid: u32, ops: Vec<Operation>) -> Self {
        let io_count = ops.iter().filter(|op| op.kind.is_io()).count() as u32;
        let task_count = ops
            .iter()
            .filter(|op| !matches!(op.kind, OperationKind::AppStart | OperationKind::AppFinish))
            .count() as u32;
        Self {
            pid,
            ops: ops.into(),
            io_count,
            task_count,
        }
    }

    pub fn set_pid(&mut self, pid: u32) {
        self.pid = pid;
    }

    pub fn peek_front(&self) -> Option<&Operation> {
        self.ops.front()
    }

    pub fn pop_front(&mut self) -> Option<Operation> {
        self.ops.pop_front()
    }

    /// Overwrite the head operation in place, used by the round-robin
    /// executor after truncating a slice (reduced `duration_ms`, and any
    /// device/memory resource it resolved along the way).
    pub fn replace_front(&mut self, op: Operation) {
        if let Some(front) = self.ops.front_mut() {
            *front = op;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.ops.is_empty()
    }

    /// Sum of the remaining durations of every still-pending operation.
    /// Recomputed fresh on every call since preemption shrinks a
    /// truncated operation's `duration_ms` in place — this is what makes
    /// STR's ordering key change between dispatches.
    pub fn remaining_duration_ms(&self) -> u64 {
        self.ops.iter().map(|op| op.duration_ms as u64).sum()
    }
}
