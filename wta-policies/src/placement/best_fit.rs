//! Best-fit placement: the candidate with the least slack.

use wta_model::MachineId;

use super::{Candidate, PlacementPolicy};

/// Chooses the candidate with the smallest `free_cpus`, tie-broken by
/// machine id ascending.
#[derive(Default)]
pub struct BestFit;

impl BestFit {
    pub fn new() -> Self {
        BestFit
    }
}

impl PlacementPolicy for BestFit {
    fn select_machine(&self, _demand: u32, candidates: &[Candidate]) -> Option<MachineId> {
        candidates
            .iter()
            .min_by_key(|c| (c.free_cpus, c.machine))
            .map(|c| c.machine)
    }
}
