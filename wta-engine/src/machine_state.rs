//! Per-machine free-capacity tracking.

use std::collections::{HashMap, HashSet};

use wta_model::{Environment, MachineId, TaskId};

use crate::error::EngineError;

struct MachineEntry {
    capacity: u32,
    free: u32,
    running: HashSet<TaskId>,
}

/// Tracks how many CPUs are free on each machine in an [`Environment`], and
/// which tasks currently occupy them.
pub struct MachineStateTable {
    entries: HashMap<MachineId, MachineEntry>,
}

impl MachineStateTable {
    pub fn new(environment: &Environment) -> Self {
        let entries = environment
            .machines()
            .iter()
            .map(|m| {
                (
                    m.id,
                    MachineEntry {
                        capacity: m.cpus,
                        free: m.cpus,
                        running: HashSet::new(),
                    },
                )
            })
            .collect();
        MachineStateTable { entries }
    }

    fn entry(&self, machine: MachineId) -> Result<&MachineEntry, EngineError> {
        self.entries
            .get(&machine)
            .ok_or(EngineError::UnknownMachine(machine))
    }

    pub fn free_cpus(&self, machine: MachineId) -> Result<u32, EngineError> {
        Ok(self.entry(machine)?.free)
    }

    pub fn capacity(&self, machine: MachineId) -> Result<u32, EngineError> {
        Ok(self.entry(machine)?.capacity)
    }

    /// All machines with at least `demand` free CPUs, as
    /// `(machine, free_cpus)` pairs in ascending machine-id order.
    pub fn candidates(&self, demand: u32) -> Vec<(MachineId, u32)> {
        let mut out: Vec<(MachineId, u32)> = self
            .entries
            .iter()
            .filter(|(_, e)| e.free >= demand)
            .map(|(&id, e)| (id, e.free))
            .collect();
        out.sort_by_key(|&(id, _)| id);
        out
    }

    /// Reserves `demand` CPUs on `machine` for `task`.
    pub fn reserve(
        &mut self,
        machine: MachineId,
        task: TaskId,
        demand: u32,
    ) -> Result<(), EngineError> {
        let entry = self
            .entries
            .get_mut(&machine)
            .ok_or(EngineError::UnknownMachine(machine))?;
        if entry.free < demand {
            return Err(EngineError::CapacityViolation {
                task,
                machine,
                demand,
                available: entry.free,
            });
        }
        entry.free -= demand;
        entry.running.insert(task);
        Ok(())
    }

    /// Releases the CPUs `task` held on `machine`.
    pub fn release(
        &mut self,
        machine: MachineId,
        task: TaskId,
        demand: u32,
    ) -> Result<(), EngineError> {
        let entry = self
            .entries
            .get_mut(&machine)
            .ok_or(EngineError::UnknownMachine(machine))?;
        entry.running.remove(&task);
        entry.free = (entry.free + demand).min(entry.capacity);
        Ok(())
    }
}
