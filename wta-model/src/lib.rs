//! Domain model for the workflow trace archive simulator.
//!
//! Every type here is immutable once constructed; the mutable runtime state
//! that the simulation mutates (which machine a task is running on, how
//! many dependencies remain) lives in `wta-engine`, not here.

pub mod dag;
pub mod error;
pub mod ids;
mod cluster;
mod machine;
mod task;
mod trace;
mod workflow;

pub use cluster::{Cluster, Environment};
pub use error::ModelError;
pub use ids::{ClusterId, MachineId, TaskId, WorkflowId};
pub use machine::Machine;
pub use task::Task;
pub use trace::Trace;
pub use workflow::Workflow;
