use std::path::Path;

use ossim_core::{Configuration, Operation, OperationKind, Process};

use crate::error::WorkloadError;

/// Parse a workload ("meta-data") file at `path` into an ordered list of
/// [`Process`]es, resolving each operation's duration against `config`'s
/// device-timing table.
pub fn load_from_path(path: &Path, config: &Configuration) -> Result<Vec<Process>, WorkloadError> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            WorkloadError::NotFound(path.to_path_buf())
        } else {
            WorkloadError::Io(err)
        }
    })?;
    load_from_str(&text, config)
}

/// Parse the `X{command}N;` token grammar spec.md §6 describes. A program
/// is `S{begin}; ... S{finish};` bracketing one or more `A{begin}; ...
/// A{finish};` applications, each becoming one `Process`.
pub fn load_from_str(text: &str, config: &Configuration) -> Result<Vec<Process>, WorkloadError> {
    let mut processes = Vec::new();
    let mut next_pid = 1u32;
    let mut current: Option<(u32, Vec<Operation>)> = None;

    for raw_token in text.split(';') {
        let token = raw_token.trim();
        if token.is_empty() {
            continue;
        }
        let (letter, command, count) = parse_token(token)?;

        match (letter, command.as_str()) {
            ('S', "begin") => {}
            ('S', "finish") => {
                if let Some((pid, _)) = current {
                    return Err(WorkloadError::UnbalancedApplication { pid_hint: pid });
                }
            }
            ('A', "begin") => {
                if current.is_some() {
                    return Err(WorkloadError::Malformed(
                        "A{begin} found before the previous application's A{finish}".into(),
                    ));
                }
                let pid = next_pid;
                next_pid += 1;
                current = Some((pid, vec![Operation::marker(OperationKind::AppStart)]));
            }
            ('A', "finish") => {
                let (pid, mut ops) = current.take().ok_or_else(|| {
                    WorkloadError::Malformed("A{finish} with no matching A{begin}".into())
                })?;
                ops.push(Operation::marker(OperationKind::AppFinish));
                tracing::debug!(pid, op_count = ops.len(), "parsed application");
                processes.push(Process::new(pid, ops));
            }
            _ => {
                let kind = resolve_operation_kind(letter, &command, token)?;
                let ops = &mut current
                    .as_mut()
                    .ok_or_else(|| {
                        WorkloadError::Malformed(format!(
                            "operation {token:?} appears outside any A{{begin}}/A{{finish}} bracket"
                        ))
                    })?
                    .1;
                let cycle_time = config.cycle_time_ms(kind);
                ops.push(Operation::new(kind, count, cycle_time));
            }
        }
    }

    if let Some((pid, _)) = current {
        return Err(WorkloadError::UnbalancedApplication { pid_hint: pid });
    }

    Ok(processes)
}

/// Split `X{command}N` into its leading letter, its bracketed command
/// name, and its trailing cycle count.
fn parse_token(token: &str) -> Result<(char, String, u32), WorkloadError> {
    let mut chars = token.chars();
    let letter = chars
        .next()
        .ok_or_else(|| WorkloadError::Malformed("empty token".into()))?;
    let rest = chars.as_str();

    if !rest.starts_with('{') {
        return Err(WorkloadError::Malformed(format!(
            "token {token:?} must open with '{{' immediately after its letter"
        )));
    }
    let close = rest.find('}').ok_or_else(|| {
        WorkloadError::Malformed(format!("token {token:?} is missing its closing '}}'"))
    })?;
    let command = rest[1..close].trim().to_string();
    let count_str = rest[close + 1..].trim();
    let count: u32 = count_str.parse().map_err(|_| {
        WorkloadError::Malformed(format!(
            "token {token:?} has a non-numeric count {count_str:?}"
        ))
    })?;
    Ok((letter, command, count))
}

fn resolve_operation_kind(
    letter: char,
    command: &str,
    token: &str,
) -> Result<OperationKind, WorkloadError> {
    match (letter, command) {
        ('P', "run") => Ok(OperationKind::ProcessorRun),
        ('M', "allocate") => Ok(OperationKind::MemoryAllocate),
        ('M', "block") => Ok(OperationKind::MemoryBlock),
        ('O', "monitor") => Ok(OperationKind::OutputMonitor),
        ('O', "projector") => Ok(OperationKind::OutputProjector),
        ('O', "hard drive") => Ok(OperationKind::OutputHardDrive),
        ('I', "keyboard") => Ok(OperationKind::InputKeyboard),
        ('I', "hard drive") => Ok(OperationKind::InputHardDrive),
        ('I', "scanner") => Ok(OperationKind::InputScanner),
        _ => Err(WorkloadError::Malformed(format!(
            "unrecognized operation token {token:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ossim_core::{Discipline, LogTarget};
    use std::path::PathBuf;

    fn config() -> Configuration {
        Configuration {
            monitor_display_ms: 10,
            processor_cycle_ms: 10,
            scanner_cycle_ms: 10,
            hard_drive_cycle_ms: 10,
            keyboard_cycle_ms: 10,
            memory_cycle_ms: 10,
            projector_cycle_ms: 10,
            num_projectors: 2,
            num_hard_drives: 2,
            total_memory_bytes: 1024,
            memory_block_size_bytes: 256,
            quantum_ms: 50,
            discipline: Discipline::Fifo,
            log_target: LogTarget::Monitor,
            log_path: PathBuf::from("log.txt"),
            workload_path: PathBuf::from("workload.txt"),
        }
    }

    #[test]
    fn empty_program_yields_no_processes() {
        let processes = load_from_str("S{begin}0; S{finish}0;", &config()).unwrap();
        assert!(processes.is_empty());
    }

    #[test]
    fn single_application_becomes_one_process_with_bracketed_ops() {
        let text = "S{begin}0; A{begin}0; P{run}2; A{finish}0; S{finish}0;";
        let processes = load_from_str(text, &config()).unwrap();
        assert_eq!(processes.len(), 1);
        let p = &processes[0];
        assert_eq!(p.pid, 1);
        assert_eq!(p.task_count, 1);
    }

    #[test]
    fn two_applications_get_sequential_pids() {
        let text = "\
            S{begin}0;\
            A{begin}0; P{run}1; A{finish}0;\
            A{begin}0; P{run}1; A{finish}0;\
            S{finish}0;";
        let processes = load_from_str(text, &config()).unwrap();
        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0].pid, 1);
        assert_eq!(processes[1].pid, 2);
    }

    #[test]
    fn hard_drive_output_and_input_resolve_to_distinct_kinds() {
        let text = "S{begin}0; A{begin}0; O{hard drive}1; I{hard drive}1; A{finish}0; S{finish}0;";
        let processes = load_from_str(text, &config()).unwrap();
        assert_eq!(processes[0].io_count, 2);
    }

    #[test]
    fn missing_app_finish_before_program_finish_is_fatal() {
        let text = "S{begin}0; A{begin}0; P{run}1; S{finish}0;";
        let err = load_from_str(text, &config()).unwrap_err();
        assert!(matches!(
            err,
            WorkloadError::UnbalancedApplication { pid_hint: 1 }
        ));
    }

    #[test]
    fn missing_app_finish_at_end_of_file_is_fatal() {
        let text = "S{begin}0; A{begin}0; P{run}1;";
        let err = load_from_str(text, &config()).unwrap_err();
        assert!(matches!(
            err,
            WorkloadError::UnbalancedApplication { pid_hint: 1 }
        ));
    }

    #[test]
    fn operation_outside_application_is_malformed() {
        let text = "S{begin}0; P{run}1; S{finish}0;";
        let err = load_from_str(text, &config()).unwrap_err();
        assert!(matches!(err, WorkloadError::Malformed(_)));
    }

    #[test]
    fn duration_is_resolved_against_the_configured_cycle_time() {
        let mut cfg = config();
        cfg.processor_cycle_ms = 15;
        let text = "S{begin}0; A{begin}0; P{run}3; A{finish}0; S{finish}0;";
        let processes = load_from_str(text, &cfg).unwrap();
        assert_eq!(processes[0].remaining_duration_ms(), 45);
    }
}
