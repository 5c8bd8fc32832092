//! Per-workflow timing report, and the workflow-deadline handshake EWF
//! ordering needs.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use wta_engine::SimulationObserver;
use wta_model::{MachineId, TaskId, Trace, WorkflowId};
use wta_policies::ordering::WorkflowDeadlines;

use crate::error::StatsError;

#[derive(Debug, Serialize)]
struct WorkflowRow {
    workflow_id: u32,
    first_submission: u64,
    last_completion: u64,
    critical_path_length: u64,
    wait_time: u64,
    makespan: u64,
}

#[derive(Default)]
struct Observed {
    first_start: Option<u64>,
    last_completion: Option<u64>,
}

/// Collects one row per workflow — workflow id, first submission, last
/// completion, critical-path length, wait time, makespan — and writes them
/// to a tab-separated file.
///
/// Also implements [`WorkflowDeadlines`]: a workflow's deadline (first
/// submission plus critical-path length) is derivable entirely from the
/// static trace, so it never depends on simulation progress. The host
/// constructs this collector, registers it as an observer, and also hands
/// it to the EWF ordering policy's constructor — the explicit handshake
/// the simulator's design notes call for, rather than EWF reaching out to
/// find a statistics provider on its own.
pub struct WorkflowStatsCollector<'t> {
    trace: &'t Trace,
    observed: HashMap<WorkflowId, Observed>,
}

impl<'t> WorkflowStatsCollector<'t> {
    pub fn new(trace: &'t Trace) -> Self {
        WorkflowStatsCollector {
            trace,
            observed: HashMap::with_capacity(trace.workflows().len()),
        }
    }

    pub fn write_tsv(&self, path: &Path) -> Result<(), StatsError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(path)
            .map_err(|source| StatsError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        for workflow in self.trace.workflows() {
            let first_submission = workflow.first_submission(self.trace);
            let observed = self.observed.get(&workflow.id);
            let first_start = observed.and_then(|o| o.first_start).unwrap_or(first_submission);
            let last_completion = observed
                .and_then(|o| o.last_completion)
                .unwrap_or(first_submission);
            let row = WorkflowRow {
                workflow_id: workflow.id.0,
                first_submission,
                last_completion,
                critical_path_length: workflow.critical_path_length(self.trace),
                wait_time: first_start.saturating_sub(first_submission),
                makespan: last_completion.saturating_sub(first_submission),
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

impl SimulationObserver for WorkflowStatsCollector<'_> {
    fn on_task_started(&mut self, task: TaskId, _machine: MachineId, now: u64) {
        let Some(t) = self.trace.task(task) else { return };
        let entry = self.observed.entry(t.workflow).or_default();
        entry.first_start = Some(entry.first_start.map_or(now, |prev| prev.min(now)));
    }

    fn on_task_completed(&mut self, task: TaskId, now: u64) {
        let Some(t) = self.trace.task(task) else { return };
        let entry = self.observed.entry(t.workflow).or_default();
        entry.last_completion = Some(entry.last_completion.map_or(now, |prev| prev.max(now)));
    }
}

impl WorkflowDeadlines for WorkflowStatsCollector<'_> {
    fn deadline(&self, workflow: WorkflowId) -> u64 {
        match self.trace.workflow(workflow) {
            Some(w) => w.first_submission(self.trace) + w.critical_path_length(self.trace),
            None => u64::MAX,
        }
    }
}
