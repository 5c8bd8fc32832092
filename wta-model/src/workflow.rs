//! The [`Workflow`] entity.

use std::cell::Cell;

use crate::dag::longest_intra_workflow_chain;
use crate::ids::{TaskId, WorkflowId};
use crate::trace::Trace;

/// A connected component of precedence edges within one submission.
///
/// `critical_path_length` is a derived attribute (the longest
/// runtime-weighted chain among member tasks, ignoring edges to tasks
/// outside the workflow) and is memoized the first time it is requested,
/// since computing it requires walking the member subgraph.
#[derive(Debug)]
pub struct Workflow {
    pub id: WorkflowId,
    tasks: Vec<TaskId>,
    critical_path_cache: Cell<Option<u64>>,
}

impl Workflow {
    pub fn new(id: WorkflowId, tasks: Vec<TaskId>) -> Self {
        Workflow {
            id,
            tasks,
            critical_path_cache: Cell::new(None),
        }
    }

    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }

    /// The longest weighted chain of member tasks, using runtimes as edge
    /// weights and ignoring cross-workflow dependency edges. Cached after
    /// first computation.
    pub fn critical_path_length(&self, trace: &Trace) -> u64 {
        if let Some(cached) = self.critical_path_cache.get() {
            return cached;
        }
        let length = longest_intra_workflow_chain(trace, &self.tasks);
        self.critical_path_cache.set(Some(length));
        length
    }

    /// The earliest submission time among member tasks.
    pub fn first_submission(&self, trace: &Trace) -> u64 {
        self.tasks
            .iter()
            .filter_map(|id| trace.task(*id))
            .map(|t| t.submission_time)
            .min()
            .unwrap_or(0)
    }
}
