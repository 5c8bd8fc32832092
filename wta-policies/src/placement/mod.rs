//! Machine-placement policy contract and its variants.

mod best_fit;

pub use best_fit::BestFit;

use wta_model::MachineId;

/// A candidate machine and its currently free CPU count, as offered to a
/// [`PlacementPolicy`] by the simulation core. Only machines whose free
/// CPUs already meet the task's demand are offered as candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub machine: MachineId,
    pub free_cpus: u32,
}

/// Selects a machine for a task from a set of machines known to have
/// sufficient free capacity.
pub trait PlacementPolicy {
    /// Returns the chosen machine, or `None` if no candidate fits (the
    /// caller is expected to only pass candidates that already satisfy
    /// `demand`, so `None` here only happens when `candidates` is empty).
    fn select_machine(&self, demand: u32, candidates: &[Candidate]) -> Option<MachineId>;
}
