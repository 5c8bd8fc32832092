//! The environment-sizing heuristic: choosing a machine count to hit a
//! target utilization, or honoring an explicit count.
//!
//! This is a collaborator to the simulation core (distilled spec §6): it
//! only ever *builds* an [`wta_model::Environment`] before a run starts,
//! and never touches the mutable machine-state table the engine maintains
//! while a simulation is in progress.

mod error;

pub use error::EnvError;

use log::debug;
use wta_model::dag::earliest_finish_times;
use wta_model::{Environment, Trace};

/// How the caller wants the cluster sized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sizing {
    /// Use exactly this many machines.
    Explicit(u32),
    /// Choose a machine count that targets this fraction of aggregate
    /// cluster CPU-time under ideal packing. Must be in `(0, 1]`.
    Utilization(f64),
}

/// Builds a single-cluster [`Environment`] for `trace` under `sizing`.
///
/// `cpus_per_machine` is the configured per-machine core count; if any
/// task in `trace` demands more cores than that, the configured value is
/// raised to the largest demand before machines are built; the heuristic
/// that sizes `Sizing::Utilization` also uses the raised value.
pub fn build_environment(
    trace: &Trace,
    sizing: Sizing,
    cpus_per_machine: u32,
) -> Result<Environment, EnvError> {
    if cpus_per_machine == 0 {
        return Err(EnvError::NonPositiveCores);
    }

    let max_demand = trace.tasks().iter().map(|t| t.cpu_demand).max().unwrap_or(0);
    let cpus_per_machine = cpus_per_machine.max(max_demand);

    let count = match sizing {
        Sizing::Explicit(n) => {
            if n == 0 {
                return Err(EnvError::NonPositiveMachineCount);
            }
            n
        }
        Sizing::Utilization(rho) => {
            if !(rho > 0.0 && rho <= 1.0) {
                return Err(EnvError::InvalidUtilization(rho.to_string()));
            }
            sized_machine_count(trace, cpus_per_machine, rho)
        }
    };

    debug!("sized environment: {count} machine(s) x {cpus_per_machine} cpus");
    Ok(Environment::single_cluster(count, cpus_per_machine))
}

/// `ceil( Σ_t (runtime_t · cpu_demand_t) / ((t_end − t_start) · cpus_per_machine · ρ) )`
/// per the distilled spec's §6 formula, where `t_end` is the maximum
/// earliest-possible completion time over the dependency DAG and `t_start`
/// is the minimum submission time. An empty trace, or a trace whose whole
/// span collapses to a single instant, needs exactly one machine: there is
/// no work to spread across more, and a zero-length window would make the
/// formula divide by zero.
fn sized_machine_count(trace: &Trace, cpus_per_machine: u32, rho: f64) -> u32 {
    if trace.is_empty() {
        return 1;
    }

    let total_work: u128 = trace
        .tasks()
        .iter()
        .map(|t| t.runtime as u128 * t.cpu_demand as u128)
        .sum();
    if total_work == 0 {
        return 1;
    }

    let t_start = trace
        .tasks()
        .iter()
        .map(|t| t.submission_time)
        .min()
        .unwrap_or(0);
    let finishes = earliest_finish_times(trace).unwrap_or_default();
    let t_end = finishes.values().copied().max().unwrap_or(t_start);
    let duration = t_end.saturating_sub(t_start).max(1);

    let denominator = duration as f64 * cpus_per_machine as f64 * rho;
    let raw = total_work as f64 / denominator;
    raw.ceil().max(1.0) as u32
}
