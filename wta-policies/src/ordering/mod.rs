//! Task-ordering policy contract and its variants.

mod ewf;
mod fcfs;
mod sjf;

pub use ewf::{EarliestWorkflowFirst, WorkflowDeadlines};
pub use fcfs::Fcfs;
pub use sjf::ShortestJobFirst;

use wta_model::TaskId;

/// Maintains a priority view of READY tasks.
///
/// `next_candidate` must be deterministic given the sequence of prior
/// `register_ready`/`remove` calls: it never reorders based on anything
/// other than the policy's fixed sort key, so repeated queries against the
/// same state return the same answer.
pub trait OrderingPolicy {
    /// Registers a task that has just become ready.
    fn register_ready(&mut self, task: TaskId);

    /// Removes a task after it has been successfully placed.
    ///
    /// Calling this with a task id that was never registered (or already
    /// removed) is a no-op.
    fn remove(&mut self, task: TaskId);

    /// Returns the next candidate to place, without removing it.
    fn next_candidate(&self) -> Option<TaskId>;
}
