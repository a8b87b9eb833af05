/*!
 * Queue Manager
 * Per-priority ready queues and the blocked queue, FIFO throughout
 */

use crate::core::types::{Pid, Priority};
use std::collections::VecDeque;

/// Ready and blocked queues, holding pids only
#[derive(Debug, Clone)]
pub struct QueueManager {
    ready: Vec<VecDeque<Pid>>,
    blocked: VecDeque<Pid>,
}

impl QueueManager {
    pub fn new(levels: u8) -> Self {
        Self {
            ready: (0..levels).map(|_| VecDeque::new()).collect(),
            blocked: VecDeque::new(),
        }
    }

    /// Append to the tail of the level's ready queue
    ///
    /// # Panics
    /// If `priority` is not below the configured number of levels. Priorities
    /// are validated when a process is created.
    pub fn enqueue_ready(&mut self, pid: Pid, priority: Priority) {
        self.ready[priority as usize].push_back(pid);
    }

    /// Pop the head of the most urgent non-empty level
    pub fn dequeue_ready(&mut self) -> Option<Pid> {
        self.ready.iter_mut().find_map(|queue| queue.pop_front())
    }

    pub fn enqueue_blocked(&mut self, pid: Pid) {
        self.blocked.push_back(pid);
    }

    /// Pop the process that has been blocked the longest
    pub fn dequeue_blocked(&mut self) -> Option<Pid> {
        self.blocked.pop_front()
    }

    pub fn levels(&self) -> u8 {
        self.ready.len() as u8
    }

    pub fn ready_at(&self, level: Priority) -> impl Iterator<Item = Pid> + '_ {
        self.ready
            .get(level as usize)
            .into_iter()
            .flat_map(|queue| queue.iter().copied())
    }

    pub fn blocked(&self) -> impl Iterator<Item = Pid> + '_ {
        self.blocked.iter().copied()
    }

    pub fn ready_len(&self) -> usize {
        self.ready.iter().map(VecDeque::len).sum()
    }

    pub fn blocked_len(&self) -> usize {
        self.blocked.len()
    }
}
