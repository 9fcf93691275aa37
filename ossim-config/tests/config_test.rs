use std::io::Write;

use ossim_config::{load_from_path, ConfigError};
use ossim_core::{Discipline, LogTarget};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config file");
    file.write_all(contents.as_bytes())
        .expect("write temp config file");
    file
}

const FIFO_CONFIG: &str = "\
Path: workload.mdf
Monitor display time {msec}: 20
Processor cycle time {msec}: 10
Scanner cycle time {msec}: 175
Hard drive cycle time {msec}: 150
Keyboard cycle time {msec}: 50
Memory cycle time {msec}: 10
Projector cycle time {msec}: 200
Projector quantity: 2
Hard drive quantity: 2
System memory {Mbytes}: 1
Memory block size {kbytes}: 256
CPU Scheduling Code: FIFO
Log: Log to Monitor
Log File Path: run.log
";

#[test]
fn loads_a_well_formed_config_file_from_disk() {
    let file = write_config(FIFO_CONFIG);
    let config = load_from_path(file.path()).expect("config should load");
    assert_eq!(config.discipline, Discipline::Fifo);
    assert_eq!(config.log_target, LogTarget::Monitor);
    assert_eq!(config.total_memory_bytes, 1024 * 1024);
}

#[test]
fn missing_file_reports_not_found() {
    let err = load_from_path(std::path::Path::new("/tmp/does-not-exist-ossim.cfg"))
        .expect_err("should fail to load");
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn memory_block_size_not_dividing_total_fails_validation() {
    let broken = FIFO_CONFIG.replace(
        "Memory block size {kbytes}: 256",
        "Memory block size {kbytes}: 300",
    );
    let file = write_config(&broken);
    let err = load_from_path(file.path()).expect_err("should fail validation");
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn zero_cycle_time_fails_validation() {
    let broken = FIFO_CONFIG.replace(
        "Processor cycle time {msec}: 10",
        "Processor cycle time {msec}: 0",
    );
    let file = write_config(&broken);
    let err = load_from_path(file.path()).expect_err("should fail validation");
    assert!(matches!(err, ConfigError::Validation(_)));
}
