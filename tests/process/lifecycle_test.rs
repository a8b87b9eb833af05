/*!
 * Lifecycle Tests
 * Fork convention, dangling parents and the built-in init program
 */

use procsim::core::limits::DEFAULT_INIT_PROGRAM;
use procsim::{
    Command, CommandDispatcher, Instruction, MemoryProgramSource, ProcessManager, ProcessState,
    StepOutcome,
};
use pretty_assertions::assert_eq;

#[test]
fn test_fork_child_runs_next_instruction_parent_skips() {
    let mut pm = ProcessManager::new();
    let parent = pm
        .create_process(2, ["S 3", "F 2", "A 10", "E", "A 100", "E"])
        .unwrap();

    pm.step().unwrap();
    let child = match pm.step().unwrap() {
        StepOutcome::Forked { child, .. } => child,
        other => panic!("expected fork, got {:?}", other),
    };

    // Parent continues two instructions past the one after F
    let p = pm.process(parent).unwrap();
    assert_eq!(p.program_counter, 4);
    assert_eq!(p.state, ProcessState::Running);

    // Child is a copy positioned right after F
    let c = pm.process(child).unwrap();
    assert_eq!(c.program_counter, 2);
    assert_eq!(c.accumulator, 3);
    assert_eq!(c.priority, 2);
    assert_eq!(c.parent_pid, Some(parent));
    assert_eq!(c.program, p.program);
    assert_eq!(pm.scheduler().queues().ready_at(2).collect::<Vec<_>>(), vec![child]);

    pm.step().unwrap();
    assert_eq!(pm.process(parent).unwrap().accumulator, 103);
}

#[test]
fn test_fork_counts_as_executed_instruction() {
    let mut pm = ProcessManager::new();
    let parent = pm.create_process(0, ["F 0", "E"]).unwrap();

    let mut dispatcher = CommandDispatcher::new(&mut pm);
    dispatcher.dispatch(Command::Tick).unwrap();

    // Level 0 quantum is one instruction, so the child now holds the CPU
    let snapshot = dispatcher.inspect().unwrap();
    assert_ne!(snapshot.running_pid(), Some(parent));
    assert_eq!(snapshot.ready_pids(0), vec![parent]);
    assert_eq!(pm.stats().forks, 1);
}

#[test]
fn test_fork_past_end_exhausts_parent() {
    let mut pm = ProcessManager::new();
    let parent = pm.create_process(3, ["F 5", "E"]).unwrap();

    pm.step().unwrap();
    assert!(pm.process(parent).unwrap().is_exhausted());
    assert!(matches!(
        pm.step().unwrap(),
        StepOutcome::Terminated { pid, .. } if pid == parent
    ));
}

#[test]
fn test_init_program_spawns_replaced_children() {
    let mut source = MemoryProgramSource::new();
    for (name, value) in [("file_a", 1), ("file_b", 2), ("file_c", 3), ("file_d", 4), ("file_e", 5)] {
        source.insert(name, [format!("S {}", value), "E".to_string()]);
    }
    let mut pm = ProcessManager::builder()
        .with_program_source(source)
        .build()
        .unwrap();
    let init = pm
        .create_process(0, DEFAULT_INIT_PROGRAM.iter().copied())
        .unwrap();

    let mut dispatcher = CommandDispatcher::new(&mut pm);
    let mut values = Vec::new();
    for _ in 0..200 {
        if let procsim::Reply::Ticked(StepOutcome::Executed {
            pid,
            instruction: Instruction::Set(v),
        }) = dispatcher.dispatch(Command::Tick).unwrap()
        {
            if pid != init {
                values.push(v);
            }
        }
    }

    values.sort_unstable();
    assert_eq!(values, vec![1, 2, 3, 4, 5]);
    assert!(pm.is_empty());
    assert_eq!(pm.stats().forks, 5);
    assert_eq!(pm.stats().replacements, 5);
}
