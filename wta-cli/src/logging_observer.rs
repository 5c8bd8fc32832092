//! An observer that logs every lifecycle callback at `debug` level.
//!
//! Registered only when `-v`/`--verbose` is passed, so a run can be
//! diagnosed without re-instrumenting the core.

use log::debug;
use wta_engine::SimulationObserver;
use wta_model::{MachineId, TaskId};

#[derive(Default)]
pub struct LoggingObserver;

impl SimulationObserver for LoggingObserver {
    fn on_task_submitted(&mut self, task: TaskId, now: u64) {
        debug!("t={now} task {task} submitted");
    }

    fn on_task_ready(&mut self, task: TaskId, now: u64) {
        debug!("t={now} task {task} ready");
    }

    fn on_task_started(&mut self, task: TaskId, machine: MachineId, now: u64) {
        debug!("t={now} task {task} started on machine {machine}");
    }

    fn on_task_completed(&mut self, task: TaskId, now: u64) {
        debug!("t={now} task {task} completed");
    }

    fn on_tick(&mut self, now: u64) {
        debug!("t={now} tick");
    }
}
