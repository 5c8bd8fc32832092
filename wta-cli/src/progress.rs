//! A lightweight textual progress reporter.
//!
//! Registered as an ordinary observer alongside the `wta-stats` collectors
//! rather than as a special case inside the engine, per the simulator's
//! design note that observers are the only channel a collaborator has into
//! simulation progress.

use wta_engine::SimulationObserver;
use wta_model::{MachineId, TaskId};

/// Prints `Tasks completed: N/total` to stderr every time the completed
/// count crosses a power-of-two threshold (1, 2, 4, 8, ...), plus a final
/// line when every task has completed. This keeps output volume bounded on
/// large traces without pulling in a progress-bar dependency for a batch
/// CLI tool.
pub struct ProgressReporter {
    total: usize,
    completed: usize,
    next_threshold: usize,
}

impl ProgressReporter {
    pub fn new(total: usize) -> Self {
        ProgressReporter {
            total,
            completed: 0,
            next_threshold: 1,
        }
    }
}

impl SimulationObserver for ProgressReporter {
    fn on_task_completed(&mut self, _task: TaskId, _now: u64) {
        self.completed += 1;
        if self.completed >= self.next_threshold || self.completed == self.total {
            eprintln!("Tasks completed: {}/{}", self.completed, self.total);
            while self.next_threshold <= self.completed {
                self.next_threshold *= 2;
            }
        }
    }

    fn on_task_started(&mut self, _task: TaskId, _machine: MachineId, _now: u64) {}
}
