use std::io::Write;
use std::path::PathBuf;

use ossim_core::{Discipline, LogTarget};
use ossim_workload::{load_from_path, WorkloadError};

fn config() -> ossim_core::Configuration {
    ossim_core::Configuration {
        monitor_display_ms: 20,
        processor_cycle_ms: 10,
        scanner_cycle_ms: 175,
        hard_drive_cycle_ms: 150,
        keyboard_cycle_ms: 50,
        memory_cycle_ms: 10,
        projector_cycle_ms: 200,
        num_projectors: 2,
        num_hard_drives: 2,
        total_memory_bytes: 1024,
        memory_block_size_bytes: 256,
        quantum_ms: 50,
        discipline: Discipline::Fifo,
        log_target: LogTarget::Monitor,
        log_path: PathBuf::from("log.txt"),
        workload_path: PathBuf::from("workload.mdf"),
    }
}

fn write_workload(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp workload file");
    file.write_all(contents.as_bytes())
        .expect("write temp workload file");
    file
}

#[test]
fn loads_two_applications_with_mixed_operations_from_disk() {
    let file = write_workload(
        "S{begin}0; \
         A{begin}0; P{run}2; O{monitor}1; A{finish}0; \
         A{begin}0; I{keyboard}1; M{allocate}3; A{finish}0; \
         S{finish}0;",
    );
    let processes = load_from_path(file.path(), &config()).expect("workload should parse");
    assert_eq!(processes.len(), 2);
    assert_eq!(processes[0].task_count, 2);
    assert_eq!(processes[1].task_count, 2);
}

#[test]
fn missing_file_reports_not_found() {
    let err = load_from_path(
        std::path::Path::new("/tmp/does-not-exist-ossim.mdf"),
        &config(),
    )
    .expect_err("should fail to load");
    assert!(matches!(err, WorkloadError::NotFound(_)));
}
