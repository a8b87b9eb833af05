/*!
 * Command Dispatcher
 * Maps the four external commands onto the process manager
 */

pub mod command;
pub mod snapshot;

pub use command::Command;
pub use snapshot::{ReadyLevel, Snapshot};

use crate::core::errors::{SimError, SimResult};
use crate::core::types::Pid;
use crate::process::{ProcessManager, StepOutcome};
use tracing::{debug, info};

/// Result of one dispatched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Tick executed; carries what the instruction did
    Ticked(StepOutcome),
    /// Wake handled; `None` when nothing was blocked
    Woken(Option<Pid>),
    /// State report for Inspect
    Report(Snapshot),
    /// Final state report; the simulation is over
    Shutdown(Snapshot),
}

impl Reply {
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Reply::Shutdown(_))
    }

    /// Report to print, if the command produced one
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Reply::Report(s) | Reply::Shutdown(s) => Some(s),
            _ => None,
        }
    }
}

/// Dispatches commands against a borrowed process manager
pub struct CommandDispatcher<'a> {
    manager: &'a mut ProcessManager,
    shut_down: bool,
}

impl<'a> CommandDispatcher<'a> {
    pub fn new(manager: &'a mut ProcessManager) -> Self {
        Self {
            manager,
            shut_down: false,
        }
    }

    /// Parse and execute one line of input
    pub fn dispatch_line(&mut self, line: &str) -> SimResult<Reply> {
        let command: Command = line.parse()?;
        self.dispatch(command)
    }

    /// Execute one command to completion
    ///
    /// Once shut down, every command is rejected with `SimulationEnded`
    /// and the manager is left untouched.
    pub fn dispatch(&mut self, command: Command) -> SimResult<Reply> {
        if self.shut_down {
            debug!(%command, "Command after shutdown rejected");
            return Err(SimError::SimulationEnded);
        }
        debug!(%command, clock = self.manager.clock(), "Dispatching command");

        match command {
            Command::Tick => {
                let outcome = self.manager.step()?;
                self.manager.advance_clock();
                self.manager.reschedule()?;
                Ok(Reply::Ticked(outcome))
            }
            Command::Wake => Ok(Reply::Woken(self.manager.wake()?)),
            Command::Inspect => Ok(Reply::Report(self.inspect()?)),
            Command::Shutdown => {
                let snapshot = self.inspect()?;
                self.shut_down = true;
                info!(
                    clock = snapshot.clock,
                    stats = ?self.manager.stats(),
                    "Simulation shut down"
                );
                Ok(Reply::Shutdown(snapshot))
            }
        }
    }

    /// Snapshot of the current state; never mutates anything
    pub fn inspect(&self) -> SimResult<Snapshot> {
        Snapshot::capture(self.manager())
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn manager(&self) -> &ProcessManager {
        &*self.manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_clock_even_when_idle() {
        let mut pm = ProcessManager::new();
        let mut dispatcher = CommandDispatcher::new(&mut pm);

        assert_eq!(
            dispatcher.dispatch(Command::Tick).unwrap(),
            Reply::Ticked(StepOutcome::Idle)
        );
        assert_eq!(dispatcher.manager().clock(), 1);
    }

    #[test]
    fn test_unknown_line_changes_nothing() {
        let mut pm = ProcessManager::new();
        pm.create_process(0, ["S 1", "E"]).unwrap();
        let mut dispatcher = CommandDispatcher::new(&mut pm);
        let before = dispatcher.inspect().unwrap();

        assert_eq!(
            dispatcher.dispatch_line("X").unwrap_err(),
            SimError::UnknownCommand("X".into())
        );
        assert_eq!(dispatcher.inspect().unwrap(), before);
    }

    #[test]
    fn test_shutdown_reports_and_flags() {
        let mut pm = ProcessManager::new();
        let mut dispatcher = CommandDispatcher::new(&mut pm);

        let reply = dispatcher.dispatch_line("T").unwrap();
        assert!(reply.is_shutdown());
        assert_eq!(reply.snapshot().unwrap().clock, 0);
        assert!(dispatcher.is_shut_down());
    }

    #[test]
    fn test_commands_after_shutdown_are_rejected() {
        let mut pm = ProcessManager::new();
        pm.create_process(0, ["S 1", "E"]).unwrap();
        let mut dispatcher = CommandDispatcher::new(&mut pm);
        dispatcher.dispatch(Command::Shutdown).unwrap();

        for command in [Command::Tick, Command::Wake, Command::Inspect, Command::Shutdown] {
            assert_eq!(
                dispatcher.dispatch(command).unwrap_err(),
                SimError::SimulationEnded
            );
        }
        assert_eq!(dispatcher.manager().clock(), 0);
    }
}
