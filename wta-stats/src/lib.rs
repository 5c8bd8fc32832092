//! Statistics collectors: [`SimulationObserver`](wta_engine::SimulationObserver)
//! implementations that persist per-task and per-workflow timing reports,
//! and supply workflow deadlines to the EWF ordering policy.

mod error;
mod task_stats;
mod workflow_stats;

pub use error::StatsError;
pub use task_stats::TaskStatsCollector;
pub use workflow_stats::WorkflowStatsCollector;
