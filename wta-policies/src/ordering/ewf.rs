//! Earliest-workflow-first ordering: by workflow-critical-path-weighted
//! deadline, then submission time, then task id.

use std::collections::BTreeSet;

use wta_model::{TaskId, Trace, WorkflowId};

use super::OrderingPolicy;

/// Supplies each workflow's deadline to [`EarliestWorkflowFirst`].
///
/// A deadline is the workflow's first submission time plus its
/// critical-path length. This is produced by an external collaborator
/// (`wta-stats`'s workflow collector) and handed to the policy's
/// constructor as an explicit dependency, per the simulator's design note
/// on avoiding late rebinding through shared mutable state: the policy
/// never reaches out to find its own statistics provider.
pub trait WorkflowDeadlines {
    fn deadline(&self, workflow: WorkflowId) -> u64;
}

/// Orders ready tasks by `(workflow_deadline, submission_time, task_id)`
/// ascending.
pub struct EarliestWorkflowFirst<'t, 'd> {
    trace: &'t Trace,
    deadlines: &'d dyn WorkflowDeadlines,
    ready: BTreeSet<(u64, u64, TaskId)>,
}

impl<'t, 'd> EarliestWorkflowFirst<'t, 'd> {
    pub fn new(trace: &'t Trace, deadlines: &'d dyn WorkflowDeadlines) -> Self {
        EarliestWorkflowFirst {
            trace,
            deadlines,
            ready: BTreeSet::new(),
        }
    }

    fn key(&self, task: TaskId) -> (u64, u64, TaskId) {
        match self.trace.task(task) {
            Some(t) => (self.deadlines.deadline(t.workflow), t.submission_time, task),
            None => (0, 0, task),
        }
    }
}

impl OrderingPolicy for EarliestWorkflowFirst<'_, '_> {
    fn register_ready(&mut self, task: TaskId) {
        self.ready.insert(self.key(task));
    }

    fn remove(&mut self, task: TaskId) {
        self.ready.remove(&self.key(task));
    }

    fn next_candidate(&self) -> Option<TaskId> {
        self.ready.iter().next().map(|&(_, _, id)| id)
    }
}
