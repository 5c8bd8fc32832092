//! Topological helpers over the dependency DAG.
//!
//! The engine itself never needs a topological order — it only tracks a
//! per-task count of unfinished dependencies. These helpers exist for
//! collaborators that do need a whole-DAG view: the workflow critical-path
//! computation and the environment-sizing heuristic's earliest-completion
//! pass (distilled spec §6).

use std::collections::{HashMap, VecDeque};

use crate::error::ModelError;
use crate::ids::TaskId;
use crate::trace::Trace;

/// Returns a topological order of all tasks in `trace` (Kahn's algorithm),
/// or the id of a task involved in a cycle if the dependency graph is not a
/// DAG.
pub fn topological_order(trace: &Trace) -> Result<Vec<TaskId>, ModelError> {
    let mut indegree: HashMap<TaskId, usize> = trace
        .tasks()
        .iter()
        .map(|t| (t.id, t.dependencies.len()))
        .collect();

    let mut queue: VecDeque<TaskId> = trace
        .tasks()
        .iter()
        .filter(|t| t.dependencies.is_empty())
        .map(|t| t.id)
        .collect();

    let mut order = Vec::with_capacity(trace.len());
    while let Some(id) = queue.pop_front() {
        order.push(id);
        for dependent in trace.dependents_of(id) {
            let remaining = indegree.get_mut(&dependent.id).expect("indexed above");
            *remaining -= 1;
            if *remaining == 0 {
                queue.push_back(dependent.id);
            }
        }
    }

    if order.len() != trace.len() {
        // Anything left with nonzero indegree is part of (or downstream of) a cycle.
        let stuck = trace
            .tasks()
            .iter()
            .find(|t| indegree.get(&t.id).copied().unwrap_or(0) > 0)
            .map(|t| t.id)
            .expect("fewer tasks ordered than exist implies a stuck task");
        return Err(ModelError::DependencyCycle(stuck));
    }

    Ok(order)
}

/// Computes, for every task, the earliest possible completion time under
/// ideal (unconstrained-capacity) execution: `max(submission_time,
/// max(finish(dep) for dep in dependencies)) + runtime`. This considers
/// cross-workflow edges and submission times, which distinguishes it from
/// [`crate::Workflow::critical_path_length`].
pub fn earliest_finish_times(trace: &Trace) -> Result<HashMap<TaskId, u64>, ModelError> {
    let order = topological_order(trace)?;
    let mut finish: HashMap<TaskId, u64> = HashMap::with_capacity(trace.len());
    for id in order {
        let task = trace.task(id).expect("id came from this trace's order");
        let ready_at = task
            .dependencies
            .iter()
            .map(|dep| finish.get(dep).copied().unwrap_or(0))
            .chain(std::iter::once(task.submission_time))
            .max()
            .unwrap_or(task.submission_time);
        finish.insert(id, ready_at + task.runtime);
    }
    Ok(finish)
}

/// Computes the longest runtime-weighted chain ending at each task,
/// restricted to dependency edges whose endpoints share `workflow` — used
/// by [`crate::Workflow::critical_path_length`]. Tasks outside `members`
/// are treated as absent (their contribution to the chain is ignored, per
/// the "ignoring cross-workflow edges" rule).
pub fn longest_intra_workflow_chain(
    trace: &Trace,
    members: &[TaskId],
) -> u64 {
    let member_set: std::collections::HashSet<TaskId> = members.iter().copied().collect();
    let mut finish: HashMap<TaskId, u64> = HashMap::with_capacity(members.len());

    // `members` is already produced in sorted (ascending TaskId) order by
    // `Trace::from_tasks`; since trace ids are assigned on ingest in
    // submission order within a workflow in every reader this workspace
    // ships, processing in id order is a valid topological order for the
    // intra-workflow subgraph in practice, but we do not rely on that: we
    // run a small local Kahn's pass instead so correctness never depends on
    // id assignment order.
    let mut indegree: HashMap<TaskId, usize> = HashMap::with_capacity(members.len());
    for &id in members {
        let task = match trace.task(id) {
            Some(t) => t,
            None => continue,
        };
        let count = task
            .dependencies
            .iter()
            .filter(|d| member_set.contains(d))
            .count();
        indegree.insert(id, count);
    }

    let mut queue: VecDeque<TaskId> = indegree
        .iter()
        .filter(|(_, &count)| count == 0)
        .map(|(&id, _)| id)
        .collect();

    let mut remaining = indegree.clone();
    let mut longest = 0u64;
    while let Some(id) = queue.pop_front() {
        let task = trace.task(id).expect("member task must exist");
        let best_pred = task
            .dependencies
            .iter()
            .filter(|d| member_set.contains(d))
            .map(|d| finish.get(d).copied().unwrap_or(0))
            .max()
            .unwrap_or(0);
        let this_finish = best_pred + task.runtime;
        finish.insert(id, this_finish);
        longest = longest.max(this_finish);

        for &other in members {
            if other == id {
                continue;
            }
            let other_task = match trace.task(other) {
                Some(t) => t,
                None => continue,
            };
            if other_task.dependencies.contains(&id) {
                if let Some(count) = remaining.get_mut(&other) {
                    *count -= 1;
                    if *count == 0 {
                        queue.push_back(other);
                    }
                }
            }
        }
    }

    longest
}
