//! Shortest-job-first ordering: by runtime, then submission time, then task id.

use std::collections::BTreeSet;

use wta_model::{TaskId, Trace};

use super::OrderingPolicy;

/// Orders ready tasks by `(runtime, submission_time, task_id)` ascending.
pub struct ShortestJobFirst<'t> {
    trace: &'t Trace,
    ready: BTreeSet<(u64, u64, TaskId)>,
}

impl<'t> ShortestJobFirst<'t> {
    pub fn new(trace: &'t Trace) -> Self {
        ShortestJobFirst {
            trace,
            ready: BTreeSet::new(),
        }
    }

    fn key(&self, task: TaskId) -> (u64, u64, TaskId) {
        match self.trace.task(task) {
            Some(t) => (t.runtime, t.submission_time, task),
            None => (0, 0, task),
        }
    }
}

impl OrderingPolicy for ShortestJobFirst<'_> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use wta_model::{Task, WorkflowId};

    fn trace_with(tasks: Vec<(u32, u64)>) -> Trace {
        let tasks = tasks
            .into_iter()
            .map(|(id, runtime)| Task::new(TaskId(id), WorkflowId(0), 0, runtime, 1, vec![]))
            .collect();
        Trace::from_tasks(tasks).unwrap()
    }

    #[test]
    fn next_candidate_when_runtimes_differ_then_shortest_first() {
        let trace = trace_with(vec![(0, 10), (1, 1)]);
        let mut policy = ShortestJobFirst::new(&trace);
        policy.register_ready(TaskId(0));
        policy.register_ready(TaskId(1));
        assert_eq!(policy.next_candidate(), Some(TaskId(1)));
    }

    #[test]
    fn next_candidate_when_runtime_ties_then_breaks_by_submission_then_id() {
        let trace = trace_with(vec![(3, 5), (1, 5)]);
        let mut policy = ShortestJobFirst::new(&trace);
        policy.register_ready(TaskId(3));
        policy.register_ready(TaskId(1));
        assert_eq!(policy.next_candidate(), Some(TaskId(1)));
    }
}
