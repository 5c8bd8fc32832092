//! [`Cluster`] and the owning [`Environment`].

use std::collections::HashMap;

use crate::ids::{ClusterId, MachineId};
use crate::machine::Machine;

/// A named group of machines. Clusters are a grouping label only — the
/// engine schedules across all machines in an [`Environment`] regardless of
/// cluster membership.
#[derive(Clone, Debug)]
pub struct Cluster {
    pub id: ClusterId,
    pub machines: Vec<MachineId>,
}

/// Owns every [`Machine`] and [`Cluster`] for a simulation run. Machines are
/// indexed contiguously from zero, so `MachineId(i)` is always a valid index
/// into the backing `Vec` for `i < machines().len()`.
#[derive(Debug, Default)]
pub struct Environment {
    machines: Vec<Machine>,
    clusters: Vec<Cluster>,
    cluster_index: HashMap<ClusterId, usize>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Builds a single-cluster environment with `count` machines, each with
    /// `cpus_per_machine` CPUs — the shape produced by `wta-env`'s sizing
    /// heuristic.
    pub fn single_cluster(count: u32, cpus_per_machine: u32) -> Self {
        let mut env = Environment::new();
        let cluster_id = ClusterId(0);
        let machines: Vec<MachineId> = (0..count)
            .map(|i| {
                let id = MachineId(i);
                env.machines.push(Machine::new(id, cluster_id, cpus_per_machine));
                id
            })
            .collect();
        env.cluster_index.insert(cluster_id, env.clusters.len());
        env.clusters.push(Cluster {
            id: cluster_id,
            machines,
        });
        env
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn machine(&self, id: MachineId) -> Option<&Machine> {
        self.machines.get(id.index())
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.cluster_index.get(&id).map(|&i| &self.clusters[i])
    }
}
