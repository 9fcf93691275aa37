use std::path::{Path, PathBuf};

use ossim_core::{Configuration, Discipline, LogTarget};

use crate::error::ConfigError;

/// Parse a configuration file at `path` into a validated [`Configuration`].
pub fn load_from_path(path: &Path) -> Result<Configuration, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound(path.to_path_buf())
        } else {
            ConfigError::Io(err)
        }
    })?;
    load_from_str(&text)
}

/// Parse the whitespace-separated, order-tolerant token grammar spec.md §6
/// describes into a validated [`Configuration`].
pub fn load_from_str(text: &str) -> Result<Configuration, ConfigError> {
    let mut fields = Fields::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((raw_key, raw_value)) = line.split_once(':') else {
            continue;
        };
        let (key, unit) = split_unit(raw_key);
        let value = raw_value.trim();
        apply(&mut fields, &key, unit.as_deref(), value)?;
    }
    fields.build()
}

/// Render a `Configuration` back out using the same grammar it was parsed
/// from — spec.md §8's round-trip testable property.
pub fn to_grammar_string(config: &Configuration) -> String {
    let discipline = match config.discipline {
        Discipline::Fifo => "FIFO",
        Discipline::Priority => "PS",
        Discipline::Sjf => "SJF",
        Discipline::Str => "STR",
        Discipline::RoundRobin => "RR",
    };
    let log_target = match config.log_target {
        LogTarget::Monitor => "Monitor",
        LogTarget::File => "File",
        LogTarget::Both => "Both",
    };
    let (mem_value, mem_unit) = shrink_bytes(config.total_memory_bytes);
    let (block_value, block_unit) = shrink_bytes(config.memory_block_size_bytes);

    let mut out = String::new();
    out.push_str(&format!("Path: {}\n", config.workload_path.display()));
    out.push_str(&format!(
        "Monitor display time {{msec}}: {}\n",
        config.monitor_display_ms
    ));
    out.push_str(&format!(
        "Processor cycle time {{msec}}: {}\n",
        config.processor_cycle_ms
    ));
    if config.discipline.requires_quantum() {
        out.push_str(&format!(
            "Processor Quantum Number {{msec}}: {}\n",
            config.quantum_ms
        ));
    }
    out.push_str(&format!(
        "Scanner cycle time {{msec}}: {}\n",
        config.scanner_cycle_ms
    ));
    out.push_str(&format!(
        "Hard drive cycle time {{msec}}: {}\n",
        config.hard_drive_cycle_ms
    ));
    out.push_str(&format!(
        "Keyboard cycle time {{msec}}: {}\n",
        config.keyboard_cycle_ms
    ));
    out.push_str(&format!(
        "Memory cycle time {{msec}}: {}\n",
        config.memory_cycle_ms
    ));
    out.push_str(&format!(
        "Projector cycle time {{msec}}: {}\n",
        config.projector_cycle_ms
    ));
    out.push_str(&format!("Projector quantity: {}\n", config.num_projectors));
    out.push_str(&format!(
        "Hard drive quantity: {}\n",
        config.num_hard_drives
    ));
    out.push_str(&format!("System memory {{{mem_unit}}}: {mem_value}\n"));
    out.push_str(&format!(
        "Memory block size {{{block_unit}}}: {block_value}\n"
    ));
    out.push_str(&format!("CPU Scheduling Code: {discipline}\n"));
    out.push_str(&format!("Log: Log to {log_target}\n"));
    out.push_str(&format!("Log File Path: {}\n", config.log_path.display()));
    out
}

/// Split a grammar key like `"Monitor display time {msec}"` into its bare
/// name and the optional bracketed unit hint.
fn split_unit(raw_key: &str) -> (String, Option<String>) {
    let raw_key = raw_key.trim();
    match (raw_key.find('{'), raw_key.find('}')) {
        (Some(start), Some(end)) if start < end => {
            let unit = raw_key[start + 1..end].to_string();
            let key = raw_key[..start].trim().to_string();
            (key, Some(unit))
        }
        _ => (raw_key.to_string(), None),
    }
}

/// The byte multiplier for a unit hint (`kbytes`, `Mbytes`, `Gbytes`),
/// case-insensitive. Defaults to 1 for an absent or unrecognized hint so a
/// malformed unit never silently scales memory wrong — callers that need a
/// hint validate it is `Some` before calling.
fn unit_multiplier(unit: &str) -> Result<u64, ConfigError> {
    match unit.to_lowercase().as_str() {
        "kbytes" => Ok(1024),
        "mbytes" => Ok(1024 * 1024),
        "gbytes" => Ok(1024 * 1024 * 1024),
        other => Err(ConfigError::Malformed(format!(
            "unrecognized memory unit {other:?}, expected kbytes, Mbytes, or Gbytes"
        ))),
    }
}

/// Render bytes back to the largest whole unit that reproduces them
/// exactly, falling back to kbytes. Used only by the writer; the parser
/// never needs the inverse.
fn shrink_bytes(bytes: u64) -> (u64, &'static str) {
    if bytes % (1024 * 1024 * 1024) == 0 {
        (bytes / (1024 * 1024 * 1024), "Gbytes")
    } else if bytes % (1024 * 1024) == 0 {
        (bytes / (1024 * 1024), "Mbytes")
    } else {
        (bytes / 1024, "kbytes")
    }
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Malformed(format!("{key}: expected an integer, got {value:?}")))
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Malformed(format!("{key}: expected an integer, got {value:?}")))
}

/// Accumulates fields across an order-tolerant pass over the token stream
/// before `build` assembles and validates the final `Configuration`.
#[derive(Default)]
struct Fields {
    workload_path: Option<PathBuf>,
    monitor_display_ms: Option<u32>,
    processor_cycle_ms: Option<u32>,
    quantum_ms: Option<u32>,
    scanner_cycle_ms: Option<u32>,
    hard_drive_cycle_ms: Option<u32>,
    keyboard_cycle_ms: Option<u32>,
    memory_cycle_ms: Option<u32>,
    projector_cycle_ms: Option<u32>,
    num_projectors: Option<u32>,
    num_hard_drives: Option<u32>,
    total_memory_bytes: Option<u64>,
    memory_block_size_bytes: Option<u64>,
    discipline: Option<Discipline>,
    log_target: Option<LogTarget>,
    log_path: Option<PathBuf>,
}

impl Fields {
    fn build(self) -> Result<Configuration, ConfigError> {
        macro_rules! require {
            ($field:ident, $name:literal) => {
                self.$field
                    .ok_or_else(|| ConfigError::Malformed(format!("missing required field: {}", $name)))?
            };
        }
        let config = Configuration {
            monitor_display_ms: require!(monitor_display_ms, "Monitor display time"),
            processor_cycle_ms: require!(processor_cycle_ms, "Processor cycle time"),
            scanner_cycle_ms: require!(scanner_cycle_ms, "Scanner cycle time"),
            hard_drive_cycle_ms: require!(hard_drive_cycle_ms, "Hard drive cycle time"),
            keyboard_cycle_ms: require!(keyboard_cycle_ms, "Keyboard cycle time"),
            memory_cycle_ms: require!(memory_cycle_ms, "Memory cycle time"),
            projector_cycle_ms: require!(projector_cycle_ms, "Projector cycle time"),
            num_projectors: require!(num_projectors, "Projector quantity"),
            num_hard_drives: require!(num_hard_drives, "Hard drive quantity"),
            total_memory_bytes: require!(total_memory_bytes, "System memory"),
            memory_block_size_bytes: require!(memory_block_size_bytes, "Memory block size"),
            quantum_ms: self.quantum_ms.unwrap_or(0),
            discipline: require!(discipline, "CPU Scheduling Code"),
            log_target: require!(log_target, "Log"),
            log_path: require!(log_path, "Log File Path"),
            workload_path: require!(workload_path, "Path"),
        };
        config
            .validate()
            .map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

fn apply(
    fields: &mut Fields,
    key: &str,
    unit: Option<&str>,
    value: &str,
) -> Result<(), ConfigError> {
    match key {
        "Path" => fields.workload_path = Some(PathBuf::from(value)),
        "Monitor display time" => fields.monitor_display_ms = Some(parse_u32(key, value)?),
        "Processor cycle time" => fields.processor_cycle_ms = Some(parse_u32(key, value)?),
        "Processor Quantum Number" => fields.quantum_ms = Some(parse_u32(key, value)?),
        "Scanner cycle time" => fields.scanner_cycle_ms = Some(parse_u32(key, value)?),
        "Hard drive cycle time" => fields.hard_drive_cycle_ms = Some(parse_u32(key, value)?),
        "Keyboard cycle time" => fields.keyboard_cycle_ms = Some(parse_u32(key, value)?),
        "Memory cycle time" => fields.memory_cycle_ms = Some(parse_u32(key, value)?),
        "Projector cycle time" => fields.projector_cycle_ms = Some(parse_u32(key, value)?),
        "Projector quantity" => fields.num_projectors = Some(parse_u32(key, value)?),
        "Hard drive quantity" => fields.num_hard_drives = Some(parse_u32(key, value)?),
        "System memory" => {
            let unit = unit.ok_or_else(|| {
                ConfigError::Malformed("System memory is missing its unit, e.g. {kbytes}".into())
            })?;
            let raw = parse_u64(key, value)?;
            fields.total_memory_bytes = Some(raw * unit_multiplier(unit)?);
        }
        "Memory block size" => {
            let unit = unit.ok_or_else(|| {
                ConfigError::Malformed(
                    "Memory block size is missing its unit, e.g. {kbytes}".into(),
                )
            })?;
            let raw = parse_u64(key, value)?;
            fields.memory_block_size_bytes = Some(raw * unit_multiplier(unit)?);
        }
        "CPU Scheduling Code" => {
            fields.discipline = Some(match value {
                "FIFO" => Discipline::Fifo,
                "PS" => Discipline::Priority,
                "SJF" => Discipline::Sjf,
                "STR" => Discipline::Str,
                "RR" => Discipline::RoundRobin,
                other => {
                    return Err(ConfigError::Malformed(format!(
                        "unknown CPU Scheduling Code {other:?}, expected FIFO, PS, SJF, STR, or RR"
                    )))
                }
            });
        }
        "Log" => {
            // The grammar's value is `Log to {Monitor|File|Both}`; only the
            // trailing keyword matters.
            let keyword = value.split_whitespace().last().unwrap_or(value);
            fields.log_target = Some(match keyword {
                "Monitor" => LogTarget::Monitor,
                "File" => LogTarget::File,
                "Both" => LogTarget::Both,
                other => {
                    return Err(ConfigError::Malformed(format!(
                        "unknown log target {other:?}, expected Monitor, File, or Both"
                    )))
                }
            });
        }
        "Log File Path" => fields.log_path = Some(PathBuf::from(value)),
        unknown => {
            tracing::debug!(key = unknown, "ignoring unrecognized configuration line");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Path: workload.mdf
Monitor display time {msec}: 20
Processor cycle time {msec}: 10
Processor Quantum Number {msec}: 50
Scanner cycle time {msec}: 175
Hard drive cycle time {msec}: 150
Keyboard cycle time {msec}: 50
Memory cycle time {msec}: 10
Projector cycle time {msec}: 200
Projector quantity: 2
Hard drive quantity: 2
System memory {kbytes}: 1024
Memory block size {kbytes}: 256
CPU Scheduling Code: RR
Log: Log to Both
Log File Path: run.log
";

    #[test]
    fn parses_every_field() {
        let config = load_from_str(SAMPLE).unwrap();
        assert_eq!(config.monitor_display_ms, 20);
        assert_eq!(config.quantum_ms, 50);
        assert_eq!(config.num_projectors, 2);
        assert_eq!(config.total_memory_bytes, 1024 * 1024);
        assert_eq!(config.memory_block_size_bytes, 256 * 1024);
        assert_eq!(config.discipline, Discipline::RoundRobin);
        assert_eq!(config.log_target, LogTarget::Both);
        assert_eq!(config.log_path, PathBuf::from("run.log"));
        assert_eq!(config.workload_path, PathBuf::from("workload.mdf"));
    }

    #[test]
    fn order_tolerant_fields_parse_the_same() {
        let reordered: String = {
            let mut lines: Vec<&str> = SAMPLE.lines().collect();
            lines.reverse();
            lines.join("\n")
        };
        let a = load_from_str(SAMPLE).unwrap();
        let b = load_from_str(&reordered).unwrap();
        assert_eq!(a.monitor_display_ms, b.monitor_display_ms);
        assert_eq!(a.total_memory_bytes, b.total_memory_bytes);
        assert_eq!(a.discipline, b.discipline);
    }

    #[test]
    fn missing_quantum_defaults_to_zero_for_non_preemptive_disciplines() {
        let without_quantum = SAMPLE
            .lines()
            .filter(|l| !l.starts_with("Processor Quantum"))
            .collect::<Vec<_>>()
            .join("\n")
            .replace("CPU Scheduling Code: RR", "CPU Scheduling Code: FIFO");
        let config = load_from_str(&without_quantum).unwrap();
        assert_eq!(config.quantum_ms, 0);
    }

    #[test]
    fn missing_quantum_fails_validation_for_round_robin() {
        let without_quantum = SAMPLE
            .lines()
            .filter(|l| !l.starts_with("Processor Quantum"))
            .collect::<Vec<_>>()
            .join("\n");
        let err = load_from_str(&without_quantum).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn unknown_scheduling_code_is_malformed() {
        let bad = SAMPLE.replace("CPU Scheduling Code: RR", "CPU Scheduling Code: WEIRD");
        let err = load_from_str(&bad).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn round_trip_is_semantically_equal() {
        let config = load_from_str(SAMPLE).unwrap();
        let rendered = to_grammar_string(&config);
        let reparsed = load_from_str(&rendered).unwrap();
        assert_eq!(reparsed.monitor_display_ms, config.monitor_display_ms);
        assert_eq!(reparsed.total_memory_bytes, config.total_memory_bytes);
        assert_eq!(
            reparsed.memory_block_size_bytes,
            config.memory_block_size_bytes
        );
        assert_eq!(reparsed.discipline, config.discipline);
        assert_eq!(reparsed.log_target, config.log_target);
        assert_eq!(reparsed.quantum_ms, config.quantum_ms);
    }

    #[test]
    fn not_found_reports_the_path() {
        let err = load_from_path(Path::new("/no/such/config.cfg")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
