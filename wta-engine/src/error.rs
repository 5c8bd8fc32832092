//! Fatal invariant violations raised by the simulation core.
//!
//! Every variant here corresponds to one of the error categories the
//! simulator's specification lists as always fatal: there is no soft-error
//! path inside the core, because any violation implies a modeling bug
//! upstream of it. The engine still returns `Result` rather than panicking,
//! so a host can print a clean message and exit rather than unwind.

use thiserror::Error;

use wta_model::{MachineId, TaskId};

use crate::task_state::Phase;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(
        "capacity violation: task {task} demands {demand} cpus on machine {machine} which only has {available} free"
    )]
    CapacityViolation {
        task: TaskId,
        machine: MachineId,
        demand: u32,
        available: u32,
    },

    #[error("lifecycle violation: task {task} cannot transition from {from:?} to {to:?}")]
    LifecycleViolation {
        task: TaskId,
        from: Phase,
        to: Phase,
    },

    #[error(
        "temporal regression: event at {event_time} processed after clock already at {clock}"
    )]
    TemporalRegression { clock: u64, event_time: u64 },

    #[error("unknown task id {0}")]
    UnknownTask(TaskId),

    #[error("unknown machine id {0}")]
    UnknownMachine(MachineId),
}
