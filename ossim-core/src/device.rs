use crate::operation::OperationKind;

/// The three independently round-robined device classes. Monitor output
/// and keyboard/scanner input have no device index of their own, so they
/// never pass through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceClass {
    ProjectorOut,
    HardDriveOut,
    HardDriveIn,
}

impl DeviceClass {
    fn of(kind: OperationKind) -> Option<Self> {
        match kind {
            OperationKind::OutputProjector => Some(DeviceClass::ProjectorOut),
            OperationKind::OutputHardDrive => Some(DeviceClass::HardDriveOut),
            OperationKind::InputHardDrive => Some(DeviceClass::HardDriveIn),
            _ => None,
        }
    }
}

/// Hands out a round-robin device index per resource-bearing I/O class.
///
/// Each class (projector-out, HDD-out, HDD-in) keeps its own counter; an
/// operation that touches a class advances only that class's counter, on
/// first touch only — a round-robin-truncated and resumed slice of the
/// same logical operation must not be assigned a second device.
#[derive(Debug, Clone)]
pub struct DeviceArbiter {
    num_projectors: u32,
    num_hard_drives: u32,
    projector_out: u32,
    hard_drive_out: u32,
    hard_drive_in: u32,
}

impl DeviceArbiter {
    pub fn new(num_projectors: u32, num_hard_drives: u32) -> Self {
        Self {
            num_projectors,
            num_hard_drives,
            projector_out: 0,
            hard_drive_out: 0,
            hard_drive_in: 0,
        }
    }

    /// Assign the next device index for `kind`'s class, advancing that
    /// class's counter. Panics if `kind` has no device class — callers
    /// only invoke this for `OperationKind::has_resource()` kinds whose
    /// class is one of the three device classes (not memory).
    pub fn next_index(&mut self, kind: OperationKind) -> u32 {
        match DeviceClass::of(kind).expect("next_index called on a non-device operation kind") {
            DeviceClass::ProjectorOut => {
                let idx = self.projector_out % self.num_projectors;
                self.projector_out += 1;
                idx
            }
            DeviceClass::HardDriveOut => {
                let idx = self.hard_drive_out % self.num_hard_drives;
                self.hard_drive_out += 1;
                idx
            }
            DeviceClass::HardDriveIn => {
                let idx = self.hard_drive_in % self.num_hard_drives;
                self.hard_drive_in += 1;
                idx
            }
        }
    }
}

/// A monotonic-cursor toy allocator: each allocation gets `cursor`, then
/// `cursor` advances by the block size and wraps to 0 if it would exceed
/// total system memory. No freeing, no reuse tracking — matching the
/// always-allocate-forward behavior of the system being modeled.
#[derive(Debug, Clone)]
pub struct MemoryAllocator {
    total_bytes: u64,
    block_size_bytes: u64,
    cursor: u64,
}

impl MemoryAllocator {
    pub fn new(total_bytes: u64, block_size_bytes: u64) -> Self {
        Self {
            total_bytes,
            block_size_bytes,
            cursor: 0,
        }
    }

    /// Allocate the next block, returning its address. Wraps the cursor
    /// back to 0 first if this block would run past `total_bytes`.
    pub fn allocate(&mut self) -> u32 {
        if self.cursor + self.block_size_bytes > self.total_bytes {
            self.cursor = 0;
        }
        let addr = self.cursor;
        self.cursor += self.block_size_bytes;
        addr as u32
    }

    /// Render an address the way the event trace expects: `0x` followed
    /// by eight lowercase hex digits, zero-padded.
    pub fn format_address(addr: u32) -> String {
        format!("0x{addr:08x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projector_and_hard_drive_counters_are_independent() {
        let mut arb = DeviceArbiter::new(2, 3);
        assert_eq!(arb.next_index(OperationKind::OutputProjector), 0);
        assert_eq!(arb.next_index(OperationKind::OutputHardDrive), 0);
        assert_eq!(arb.next_index(OperationKind::OutputProjector), 1);
        assert_eq!(arb.next_index(OperationKind::InputHardDrive), 0);
        assert_eq!(arb.next_index(OperationKind::OutputHardDrive), 1);
    }

    #[test]
    fn device_index_wraps_around_class_size() {
        let mut arb = DeviceArbiter::new(2, 1);
        assert_eq!(arb.next_index(OperationKind::OutputProjector), 0);
        assert_eq!(arb.next_index(OperationKind::OutputProjector), 1);
        assert_eq!(arb.next_index(OperationKind::OutputProjector), 0);
    }

    #[test]
    fn memory_allocator_advances_by_block_size() {
        let mut mem = MemoryAllocator::new(1024, 256);
        assert_eq!(mem.allocate(), 0);
        assert_eq!(mem.allocate(), 256);
        assert_eq!(mem.allocate(), 512);
    }

    #[test]
    fn memory_allocator_wraps_when_exceeding_total() {
        let mut mem = MemoryAllocator::new(1024, 256);
        mem.allocate(); // 0
        mem.allocate(); // 256
        mem.allocate(); // 512
        let last = mem.allocate(); // 768, next would be 1024 == total, stays
        assert_eq!(last, 768);
        let wrapped = mem.allocate(); // next (1280) > total -> wraps to 0
        assert_eq!(wrapped, 0);
    }

    #[test]
    fn address_formatting_is_zero_padded_lowercase_hex() {
        assert_eq!(MemoryAllocator::format_address(0), "0x00000000");
        assert_eq!(MemoryAllocator::format_address(256), "0x00000100");
        assert_eq!(MemoryAllocator::format_address(0xdead_beef), "0xdeadbeef");
    }
}
