//! Per-task timing report.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use wta_engine::SimulationObserver;
use wta_model::{MachineId, TaskId, Trace};

use crate::error::StatsError;

#[derive(Debug, Serialize)]
struct TaskRow {
    task_id: u32,
    workflow_id: u32,
    submission_time: u64,
    start_time: u64,
    end_time: u64,
    runtime: u64,
    cpu_demand: u32,
    machine_id: u32,
}

#[derive(Default)]
struct Observed {
    start_time: Option<u64>,
    machine_id: Option<u32>,
    end_time: Option<u64>,
}

/// Collects one row per task — task id, workflow id, submission time,
/// start time, end time, runtime, CPU demand, machine id — and writes them
/// to a tab-separated file.
pub struct TaskStatsCollector<'t> {
    trace: &'t Trace,
    observed: HashMap<TaskId, Observed>,
}

impl<'t> TaskStatsCollector<'t> {
    pub fn new(trace: &'t Trace) -> Self {
        TaskStatsCollector {
            trace,
            observed: HashMap::with_capacity(trace.len()),
        }
    }

    /// Returns the observed `(start_time, end_time)` for `task`, defaulting
    /// unobserved fields to the task's submission time exactly as
    /// [`Self::write_tsv`] does — used by the host's post-run sanity check,
    /// which has no other way to see per-task timings once the simulation
    /// has finished running.
    pub fn timing(&self, task: TaskId) -> (u64, u64) {
        let submission = self.trace.task(task).map(|t| t.submission_time).unwrap_or(0);
        let observed = self.observed.get(&task);
        let start = observed.and_then(|o| o.start_time).unwrap_or(submission);
        let end = observed.and_then(|o| o.end_time).unwrap_or(submission);
        (start, end)
    }

    /// Writes one header row plus one row per task, in ascending task-id
    /// order, to `path` as a tab-separated file.
    pub fn write_tsv(&self, path: &Path) -> Result<(), StatsError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(path)
            .map_err(|source| StatsError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        let mut tasks: Vec<_> = self.trace.tasks().iter().collect();
        tasks.sort_by_key(|t| t.id);
        for task in tasks {
            let observed = self.observed.get(&task.id);
            let row = TaskRow {
                task_id: task.id.0,
                workflow_id: task.workflow.0,
                submission_time: task.submission_time,
                start_time: observed.and_then(|o| o.start_time).unwrap_or(task.submission_time),
                end_time: observed.and_then(|o| o.end_time).unwrap_or(task.submission_time),
                runtime: task.runtime,
                cpu_demand: task.cpu_demand,
                machine_id: observed.and_then(|o| o.machine_id).unwrap_or(0),
            };
            writer.serialize(&row).map_err(|source| StatsError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        writer.flush().map_err(|e| StatsError::Write {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        })?;
        Ok(())
    }
}

impl SimulationObserver for TaskStatsCollector<'_> {
    fn on_task_started(&mut self, task: TaskId, machine: MachineId, now: u64) {
        let entry = self.observed.entry(task).or_default();
        entry.start_time = Some(now);
        entry.machine_id = Some(machine.0);
    }

    fn on_task_completed(&mut self, task: TaskId, now: u64) {
        self.observed.entry(task).or_default().end_time = Some(now);
    }
}
