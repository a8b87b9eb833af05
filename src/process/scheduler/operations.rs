/*!
 * Scheduler Core Operations
 * Admit, account, preempt, dispatch, block and wake
 */

use super::Scheduler;
use crate::core::errors::SimResult;
use crate::core::types::Pid;
use crate::process::table::ProcessTable;
use crate::process::types::ProcessState;
use tracing::{debug, info};

impl Scheduler {
    /// Put a Ready process at the tail of its level's queue
    pub fn admit(&mut self, table: &mut ProcessTable, pid: Pid) -> SimResult<()> {
        let process = table.require_mut(pid)?;
        process.state = ProcessState::Ready;
        self.queues.enqueue_ready(pid, process.priority);
        Ok(())
    }

    /// Note that `pid` executed one instruction; charged at the next reschedule
    pub fn record_execution(&mut self, pid: Pid) {
        self.executed = Some(pid);
    }

    /// Charge the running process, preempt it on quantum expiry, and fill an
    /// empty running slot from the ready queues
    ///
    /// Returns the process occupying the slot afterwards.
    pub fn reschedule(&mut self, table: &mut ProcessTable) -> SimResult<Option<Pid>> {
        let charged = self.executed.take();

        if let Some(pid) = self.running {
            if charged == Some(pid) {
                self.charge(table, pid)?;
            }
        }

        if self.running.is_none() {
            self.dispatch(table)?;
        }

        Ok(self.running)
    }

    fn charge(&mut self, table: &mut ProcessTable, pid: Pid) -> SimResult<()> {
        let process = table.require_mut(pid)?;
        process.cpu_time_used += 1;

        let slice = self.time_slice(process.priority);
        if process.cpu_time_used >= slice {
            process.state = ProcessState::Ready;
            process.cpu_time_used = 0;
            self.queues.enqueue_ready(pid, process.priority);
            self.running = None;
            self.stats.preemptions += 1;

            debug!(pid, priority = process.priority, slice, "Process preempted");
        }

        Ok(())
    }

    fn dispatch(&mut self, table: &mut ProcessTable) -> SimResult<()> {
        let Some(pid) = self.queues.dequeue_ready() else {
            debug!("No ready process, CPU idle");
            return Ok(());
        };

        let process = table.require_mut(pid)?;
        process.state = ProcessState::Running;
        process.cpu_time_used = 0;
        self.running = Some(pid);

        self.stats.dispatches += 1;
        if self.last_dispatched != Some(pid) {
            self.stats.context_switches += 1;
        }
        self.last_dispatched = Some(pid);

        debug!(pid, priority = process.priority, "Dispatched process");
        Ok(())
    }

    /// Empty the running slot without requeueing its occupant
    pub fn release_running(&mut self) -> Option<Pid> {
        self.executed = None;
        self.running.take()
    }

    /// Move the running process to the tail of the blocked queue
    pub fn block_running(&mut self, table: &mut ProcessTable) -> SimResult<Option<Pid>> {
        let Some(pid) = self.release_running() else {
            return Ok(None);
        };

        table.require_mut(pid)?.state = ProcessState::Blocked;
        self.queues.enqueue_blocked(pid);
        self.stats.blocks += 1;

        info!(pid, "Process blocked");
        Ok(Some(pid))
    }

    /// Move the longest-blocked process back to its ready queue
    pub fn wake(&mut self, table: &mut ProcessTable) -> SimResult<Option<Pid>> {
        let Some(pid) = self.queues.dequeue_blocked() else {
            return Ok(None);
        };

        self.admit(table, pid)?;
        self.stats.wakes += 1;

        info!(pid, "Process woken");
        Ok(Some(pid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::SimError;

    fn setup(priorities: &[u8]) -> (Scheduler, ProcessTable, Vec<Pid>) {
        let mut scheduler = Scheduler::new(4);
        let mut table = ProcessTable::new();
        let pids = priorities
            .iter()
            .map(|&priority| {
                let pid = table.insert(None, priority, vec![], 0);
                scheduler.admit(&mut table, pid).unwrap();
                pid
            })
            .collect();
        (scheduler, table, pids)
    }

    #[test]
    fn test_dispatch_highest_priority_first() {
        let (mut scheduler, mut table, pids) = setup(&[2, 0, 1]);

        assert_eq!(scheduler.reschedule(&mut table).unwrap(), Some(pids[1]));
        assert_eq!(table.get(pids[1]).unwrap().state, ProcessState::Running);
    }

    #[test]
    fn test_reschedule_without_execution_does_not_charge() {
        let (mut scheduler, mut table, pids) = setup(&[0, 0]);
        scheduler.reschedule(&mut table).unwrap();

        // Nothing executed, so the level-0 process keeps the CPU
        assert_eq!(scheduler.reschedule(&mut table).unwrap(), Some(pids[0]));
        assert_eq!(table.get(pids[0]).unwrap().cpu_time_used, 0);
    }

    #[test]
    fn test_preempt_after_quantum() {
        let (mut scheduler, mut table, pids) = setup(&[1, 1]);
        scheduler.reschedule(&mut table).unwrap();

        scheduler.record_execution(pids[0]);
        assert_eq!(scheduler.reschedule(&mut table).unwrap(), Some(pids[0]));
        assert_eq!(table.get(pids[0]).unwrap().cpu_time_used, 1);

        scheduler.record_execution(pids[0]);
        assert_eq!(scheduler.reschedule(&mut table).unwrap(), Some(pids[1]));

        let preempted = table.get(pids[0]).unwrap();
        assert_eq!(preempted.state, ProcessState::Ready);
        assert_eq!(preempted.cpu_time_used, 0);
        assert_eq!(scheduler.queues().ready_at(1).collect::<Vec<_>>(), vec![pids[0]]);
        assert_eq!(scheduler.stats().preemptions, 1);
    }

    #[test]
    fn test_lone_process_is_redispatched_after_preemption() {
        let (mut scheduler, mut table, pids) = setup(&[0]);
        scheduler.reschedule(&mut table).unwrap();

        scheduler.record_execution(pids[0]);
        assert_eq!(scheduler.reschedule(&mut table).unwrap(), Some(pids[0]));
        assert_eq!(table.get(pids[0]).unwrap().cpu_time_used, 0);
        assert_eq!(scheduler.stats().dispatches, 2);
        assert_eq!(scheduler.stats().context_switches, 1);
    }

    #[test]
    fn test_block_and_wake_fifo() {
        let (mut scheduler, mut table, pids) = setup(&[3, 0]);

        scheduler.reschedule(&mut table).unwrap();
        assert_eq!(scheduler.block_running(&mut table).unwrap(), Some(pids[1]));
        scheduler.reschedule(&mut table).unwrap();
        assert_eq!(scheduler.block_running(&mut table).unwrap(), Some(pids[0]));
        assert!(scheduler.is_idle());

        assert_eq!(scheduler.wake(&mut table).unwrap(), Some(pids[1]));
        assert_eq!(scheduler.wake(&mut table).unwrap(), Some(pids[0]));
        assert_eq!(scheduler.wake(&mut table).unwrap(), None);
        assert_eq!(table.get(pids[0]).unwrap().state, ProcessState::Ready);
    }

    #[test]
    fn test_missing_process_is_reported() {
        let mut scheduler = Scheduler::new(1);
        let mut table = ProcessTable::new();
        let pid = table.insert(None, 0, vec![], 0);
        scheduler.admit(&mut table, pid).unwrap();
        table.remove(pid);

        assert_eq!(
            scheduler.reschedule(&mut table).unwrap_err(),
            SimError::MissingProcess(pid)
        );
    }
}
