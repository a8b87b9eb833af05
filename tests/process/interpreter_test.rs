/*!
 * Interpreter Tests
 * Per-opcode effects and program counter rules
 */

use procsim::program::parse_program;
use procsim::{Instruction, MemoryProgramSource, ProcessManager, SimError, StepOutcome, TerminationReason};
use pretty_assertions::assert_eq;

fn manager_with(source: MemoryProgramSource) -> ProcessManager {
    ProcessManager::builder()
        .with_program_source(source)
        .build()
        .unwrap()
}

#[test]
fn test_set_add_sub_advance_by_one() {
    let mut pm = ProcessManager::new();
    let pid = pm.create_process(3, ["S 10", "A 5", "D 20"]).unwrap();

    for expected_pc in 1..=3 {
        pm.step().unwrap();
        assert_eq!(pm.process(pid).unwrap().program_counter, expected_pc);
    }
    assert_eq!(pm.process(pid).unwrap().accumulator, -5);
}

#[test]
fn test_arithmetic_wraps_instead_of_overflowing() {
    let mut pm = ProcessManager::new();
    let pid = pm
        .create_process(3, [format!("S {}", i64::MAX), "A 1".to_string()])
        .unwrap();

    pm.step().unwrap();
    pm.step().unwrap();
    assert_eq!(pm.process(pid).unwrap().accumulator, i64::MIN);
}

#[test]
fn test_exit_removes_record_immediately() {
    let mut pm = ProcessManager::new();
    let pid = pm.create_process(0, ["E", "S 1"]).unwrap();

    assert_eq!(
        pm.step().unwrap(),
        StepOutcome::Terminated {
            pid,
            reason: TerminationReason::Exit
        }
    );
    assert!(pm.process(pid).is_none());
    assert_eq!(pm.running(), None);
    assert_eq!(pm.stats().terminations, 1);
}

#[test]
fn test_exit_hands_cpu_to_next_ready_process() {
    let mut pm = ProcessManager::new();
    let first = pm.create_process(2, ["E"]).unwrap();
    let second = pm.create_process(2, ["S 1", "E"]).unwrap();

    pm.step().unwrap();
    assert!(pm.process(first).is_none());
    assert_eq!(pm.running(), Some(second));
    assert_eq!(pm.process(second).unwrap().cpu_time_used, 0);
}

#[test]
fn test_empty_program_terminates_on_first_step() {
    let mut pm = ProcessManager::new();
    let pid = pm.create_process(0, Vec::<String>::new()).unwrap();

    assert_eq!(
        pm.step().unwrap(),
        StepOutcome::Terminated {
            pid,
            reason: TerminationReason::ProgramExhausted
        }
    );
}

#[test]
fn test_replace_resets_counter_and_keeps_accumulator() {
    let source = MemoryProgramSource::new().with_program("file_a", ["A 1", "E"]);
    let mut pm = manager_with(source);
    let pid = pm.create_process(3, ["S 7", "R file_a", "S 0"]).unwrap();

    pm.step().unwrap();
    pm.step().unwrap();

    let process = pm.process(pid).unwrap();
    assert_eq!(process.program_counter, 0);
    assert_eq!(process.program, parse_program(["A 1", "E"]).unwrap());
    assert_eq!(process.accumulator, 7);

    pm.step().unwrap();
    assert_eq!(pm.process(pid).unwrap().accumulator, 8);
    assert_eq!(pm.stats().replacements, 1);
}

#[test]
fn test_replace_from_missing_source_is_contained() {
    let mut pm = ProcessManager::new();
    let pid = pm.create_process(3, ["R nowhere", "S 3"]).unwrap();

    match pm.step().unwrap() {
        StepOutcome::ReplaceFailed { pid: failed, error } => {
            assert_eq!(failed, pid);
            assert!(matches!(error, SimError::ProgramSourceUnavailable { ref name, .. } if name == "nowhere"));
        }
        other => panic!("expected failed replacement, got {:?}", other),
    }

    let process = pm.process(pid).unwrap();
    assert_eq!(process.program.len(), 2);
    assert_eq!(process.program_counter, 1);
    assert_eq!(process.program[1], Instruction::Set(3));
    assert_eq!(pm.running(), Some(pid));
}

#[test]
fn test_replace_from_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("file_b"), "S 100\n\nD 1\nE\n").unwrap();

    let mut pm = ProcessManager::builder()
        .with_program_source(procsim::FsProgramSource::new(dir.path()))
        .build()
        .unwrap();
    let pid = pm.create_process(3, ["R file_b"]).unwrap();

    pm.step().unwrap();
    pm.step().unwrap();
    pm.step().unwrap();
    assert_eq!(pm.process(pid).unwrap().accumulator, 99);
    assert!(matches!(
        pm.step().unwrap(),
        StepOutcome::Terminated {
            reason: TerminationReason::Exit,
            ..
        }
    ));
}

#[test]
fn test_replacement_with_unknown_opcode_terminates_only_that_process() {
    let source = MemoryProgramSource::new().with_program("broken", ["S 1", "JMP 0"]);
    let mut pm = manager_with(source);
    let faulty = pm.create_process(1, ["R broken"]).unwrap();
    let healthy = pm.create_process(1, ["S 2", "E"]).unwrap();

    let outcome = pm.step().unwrap();
    assert_eq!(
        outcome,
        StepOutcome::Terminated {
            pid: faulty,
            reason: TerminationReason::Faulted(SimError::UnknownOpcode {
                line: "JMP 0".into(),
                opcode: "JMP".into()
            })
        }
    );
    assert_eq!(pm.running(), Some(healthy));
}
