/// The closed set of operation kinds a workload can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    ProcessorRun,
    MemoryAllocate,
    MemoryBlock,
    OutputMonitor,
    OutputProjector,
    OutputHardDrive,
    InputKeyboard,
    InputHardDrive,
    InputScanner,
    AppStart,
    AppFinish,
}

impl OperationKind {
    /// Whether this kind belongs to the I/O subset serialized by the
    /// device arbiter.
    pub fn is_io(self) -> bool {
        matches!(
            self,
            OperationKind::OutputMonitor
                | OperationKind::OutputProjector
                | OperationKind::OutputHardDrive
                | OperationKind::InputKeyboard
                | OperationKind::InputHardDrive
                | OperationKind::InputScanner
        )
    }

    /// Whether this kind allocates a device index or a memory address the
    /// first time it is dispatched (projector/HDD device selection,
    /// memory allocation). Monitor and keyboard/scanner I/O have no such
    /// resource.
    pub fn has_resource(self) -> bool {
        matches!(
            self,
            OperationKind::MemoryAllocate
                | OperationKind::OutputProjector
                | OperationKind::OutputHardDrive
                | OperationKind::InputHardDrive
        )
    }
}

/// One unit of work inside a process. Immutable once constructed, except
/// for the bookkeeping fields the round-robin executor mutates when it
/// truncates a slice (`duration_ms`) or resolves a device index / memory
/// address the first time the operation is touched (`resolved`,
/// `resource_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub cycles: u32,
    pub duration_ms: u32,
    /// Set once the operation has been dispatched for the first time.
    /// Guards `resource_id` so a truncated-then-resumed operation keeps
    /// the same device index / memory address across slices.
    pub resolved: bool,
    /// Meaningful only when `resolved` and `kind.has_resource()`: the
    /// device index or the 32-bit memory address assigned on first touch.
    pub resource_id: u32,
}

impl Operation {
    /// Build a timed operation, resolving `duration_ms = cycles *
    /// cycle_time_ms` up front.
    pub fn new(kind: OperationKind, cycles: u32, cycle_time_ms: u32) -> Self {
        Self {
            kind,
            cycles,
            duration_ms: cycles.saturating_mul(cycle_time_ms),
            resolved: false,
            resource_id: 0,
        }
    }

    /// The `AppStart`/`AppFinish` bracket markers: zero duration, never
    /// delayed, never resolved against a device or memory resource.
    pub fn marker(kind: OperationKind) -> Self {
        debug_assert!(matches!(
            kind,
            OperationKind::AppStart | OperationKind::AppFinish
        ));
        Self {
            kind,
            cycles: 0,
            duration_ms: 0,
            resolved: false,
            resource_id: 0,
        }
    }
}
