//! Errors raised while building or querying the domain model.
//!
//! These are distinct from `wta_engine::EngineError`: they describe problems
//! with the static data (a malformed trace, a dangling id) rather than a
//! runtime invariant violated during simulation.

use thiserror::Error;

use crate::ids::{TaskId, WorkflowId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("task {0} references unknown dependency {1}")]
    UnknownDependency(TaskId, TaskId),

    #[error("duplicate task id {0}")]
    DuplicateTask(TaskId),

    #[error("task {0} references unknown workflow {1}")]
    UnknownWorkflow(TaskId, WorkflowId),

    #[error("dependency cycle detected involving task {0}")]
    DependencyCycle(TaskId),
}
