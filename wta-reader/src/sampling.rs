//! Deterministic workflow-level sampling.
//!
//! The distilled spec leaves the granularity of sampling as an open
//! question; this reader samples whole workflows (never individual tasks
//! out of one), since dropping a task from the middle of a workflow would
//! silently break the precedence and critical-path invariants the engine
//! and `wta-model` are built to enforce.

use wta_model::WorkflowId;

/// A large prime used purely to scatter workflow ids across `[0, MODULUS)`
/// before comparing against the sampling fraction; it has no relationship
/// to the trace data itself.
const MODULUS: u64 = 1_000_000_007;
const SCATTER: u64 = 2_654_435_761;

/// Returns `true` if the workflow should be retained under `fraction`.
///
/// `fraction` is clamped to `[0.0, 1.0]`; a fraction of `1.0` keeps every
/// workflow and a fraction of `0.0` keeps none. The same `(id, fraction)`
/// pair always returns the same answer, so repeated reads of the same
/// trace with the same sampling fraction retain the same workflows.
pub fn keep_workflow(id: WorkflowId, fraction: f64) -> bool {
    let fraction = fraction.clamp(0.0, 1.0);
    let scattered = (id.0 as u64).wrapping_mul(SCATTER) % MODULUS;
    (scattered as f64 / MODULUS as f64) < fraction
}
