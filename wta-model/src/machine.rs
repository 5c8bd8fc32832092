//! The [`Machine`] entity.

use crate::ids::{ClusterId, MachineId};

/// An immutable description of one machine's capacity.
#[derive(Clone, Debug)]
pub struct Machine {
    pub id: MachineId,
    pub cluster: ClusterId,
    pub cpus: u32,
}

impl Machine {
    pub fn new(id: MachineId, cluster: ClusterId, cpus: u32) -> Self {
        assert!(cpus > 0, "machine {id} must have a positive CPU count");
        Machine { id, cluster, cpus }
    }
}
