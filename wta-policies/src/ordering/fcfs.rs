//! First-come-first-served ordering: by submission time, then task id.

use std::collections::BTreeSet;

use wta_model::{TaskId, Trace};

use super::OrderingPolicy;

/// Orders ready tasks by `(submission_time, task_id)` ascending.
pub struct Fcfs<'t> {
    trace: &'t Trace,
    ready: BTreeSet<(u64, TaskId)>,
}

impl<'t> Fcfs<'t> {
    pub fn new(trace: &'t Trace) -> Self {
        Fcfs {
            trace,
            ready: BTreeSet::new(),
        }
    }

    fn key(&self, task: TaskId) -> (u64, TaskId) {
        let submission = self
            .trace
            .task(task)
            .map(|t| t.submission_time)
            .unwrap_or(0);
        (submission, task)
    }
}

impl OrderingPolicy for Fcfs<'_> {
    fn register_ready(&mut self, task: TaskId) {
        self.ready.insert(self.key(task));
    }

    fn remove(&mut self, task: TaskId) {
        self.ready.remove(&self.key(task));
    }

    fn next_candidate(&self) -> Option<TaskId> {
        self.ready.iter().next().map(|&(_, id)| id)
    }
}
