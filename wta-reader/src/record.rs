//! The on-disk row shape: one task per row of a tab-separated trace file.

use serde::Deserialize;

/// A single row of a trace file, before it is validated and converted into
/// a [`wta_model::Task`].
///
/// `dependencies` is left as a raw string (a comma-separated list of task
/// ids, empty for a root task) rather than a `Vec<u32>` because `csv`'s
/// derive-based deserialization has no built-in support for a
/// delimiter-within-a-delimiter column; the reader parses it by hand after
/// deserializing the row.
#[derive(Debug, Deserialize)]
pub struct Record {
    pub task_id: u32,
    pub workflow_id: u32,
    pub submission_time: u64,
    pub runtime: u64,
    pub cpu_demand: u32,
    #[serde(default)]
    pub dependencies: String,
}

impl Record {
    /// Parses the `dependencies` column into task ids, rejecting anything
    /// that doesn't parse as a `u32`.
    pub fn parse_dependencies(&self) -> Result<Vec<u32>, String> {
        self.dependencies
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u32>()
                    .map_err(|_| format!("invalid dependency id '{s}'"))
            })
            .collect()
    }
}
