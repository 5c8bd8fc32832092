//! The observer protocol: synchronous lifecycle notifications.
//!
//! Observers are notified in registration order, after the state change
//! they describe has already been applied to the monitor/machine tables —
//! an observer never sees a half-applied transition.

use wta_model::{MachineId, TaskId};

/// Receives lifecycle notifications from a running [`crate::simulation::Simulation`].
///
/// Every method has a default no-op body so an observer only needs to
/// implement the callbacks it cares about (the style `wta-stats`'s
/// collectors follow: the task collector ignores `on_tick`, the workflow
/// collector ignores per-task start events).
pub trait SimulationObserver {
    fn on_task_submitted(&mut self, task: TaskId, now: u64) {
        let _ = (task, now);
    }

    fn on_task_ready(&mut self, task: TaskId, now: u64) {
        let _ = (task, now);
    }

    fn on_task_started(&mut self, task: TaskId, machine: MachineId, now: u64) {
        let _ = (task, machine, now);
    }

    fn on_task_completed(&mut self, task: TaskId, now: u64) {
        let _ = (task, now);
    }

    fn on_tick(&mut self, now: u64) {
        let _ = now;
    }
}
