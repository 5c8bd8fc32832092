//! Trace ingestion: on-disk tabular trace files into a [`wta_model::Trace`].
//!
//! The on-disk format is a tab-separated file with one header row and one
//! row per task: `task_id`, `workflow_id`, `submission_time`, `runtime`,
//! `cpu_demand`, `dependencies` (a comma-separated list of task ids, empty
//! for roots). This crate is the only place in the workspace that knows
//! that format; everything downstream only ever sees a `Trace`.

mod error;
mod record;
mod sampling;

pub use error::ReaderError;
pub use sampling::keep_workflow;

use std::path::{Path, PathBuf};

use log::{debug, info};
use wta_model::{Task, TaskId, Trace, WorkflowId};

use record::Record;

/// Reads a [`Trace`] from one or more paths.
///
/// Each path may be a single trace file or a directory containing trace
/// files (searched recursively for entries named `*.tsv` or `*.csv`); rows
/// from every discovered file are pooled into one trace. When
/// `sample_fraction` is `Some(f)`, only a deterministic subset of workflows
/// (see [`keep_workflow`]) is retained, along with all of their member
/// tasks.
/// A named trace-file format. Only `TabularReader` ships today; the trait
/// exists so a second on-disk format could be registered under
/// `wta-registry` without the simulation core ever knowing file formats
/// exist at all.
pub trait TraceReader {
    fn read(&self, paths: &[PathBuf], sample_fraction: Option<f64>) -> Result<Trace, ReaderError>;
}

/// The tab-separated trace format documented at the top of this crate.
#[derive(Default)]
pub struct TabularReader;

impl TraceReader for TabularReader {
    fn read(&self, paths: &[PathBuf], sample_fraction: Option<f64>) -> Result<Trace, ReaderError> {
        read_trace(paths, sample_fraction)
    }
}

pub fn read_trace(paths: &[PathBuf], sample_fraction: Option<f64>) -> Result<Trace, ReaderError> {
    let files = discover_files(paths)?;
    info!("reading {} trace file(s)", files.len());

    let mut tasks = Vec::new();
    for file in &files {
        tasks.extend(read_file(file)?);
    }

    let tasks = match sample_fraction {
        Some(fraction) => {
            let before = tasks.len();
            let filtered: Vec<Task> = tasks
                .into_iter()
                .filter(|t| keep_workflow(t.workflow, fraction))
                .collect();
            debug!(
                "sampling fraction {fraction} retained {} of {before} tasks",
                filtered.len()
            );
            filtered
        }
        None => tasks,
    };

    Trace::from_tasks(tasks).map_err(ReaderError::from)
}

/// Expands `paths` into a flat, sorted list of trace files.
fn discover_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ReaderError> {
    let mut files = Vec::new();
    for path in paths {
        if !path.exists() {
            return Err(ReaderError::PathNotFound(path.clone()));
        }
        if path.is_dir() {
            collect_dir(path, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }
    if files.is_empty() {
        return Err(ReaderError::Empty(
            paths.first().cloned().unwrap_or_default(),
        ));
    }
    files.sort();
    Ok(files)
}

fn collect_dir(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), ReaderError> {
    let entries = std::fs::read_dir(dir).map_err(|source| ReaderError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| ReaderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_dir(&path, out)?;
            continue;
        }
        let is_trace_file = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "tsv" || ext == "csv");
        if is_trace_file {
            out.push(path);
        }
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<Task>, ReaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)
        .map_err(|source| ReaderError::Csv {
            path: path.to_path_buf(),
            record: 0,
            source,
        })?;

    let mut tasks = Vec::new();
    for (index, result) in reader.deserialize::<Record>().enumerate() {
        let record_no = index as u64 + 1;
        let record = result.map_err(|source| ReaderError::Csv {
            path: path.to_path_buf(),
            record: record_no,
            source,
        })?;
        let dependencies = record.parse_dependencies().map_err(|reason| ReaderError::InvalidRow {
            path: path.to_path_buf(),
            record: record_no,
            reason,
        })?;
        tasks.push(Task::new(
            TaskId(record.task_id),
            WorkflowId(record.workflow_id),
            record.submission_time,
            record.runtime,
            record.cpu_demand,
            dependencies.into_iter().map(TaskId).collect(),
        ));
    }
    Ok(tasks)
}
