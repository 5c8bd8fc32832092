//! The per-task lifecycle table.
//!
//! Every task moves monotonically through [`Phase`]: a phase, once left, is
//! never revisited. The monitor is the single source of truth the
//! simulation core consults before emitting any event, so a bug anywhere
//! else in the engine tends to surface here first as a [`EngineError::LifecycleViolation`].

use std::collections::HashMap;

use wta_model::{TaskId, Trace};

use crate::error::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Unsubmitted,
    Submitted,
    Ready,
    Running,
    Completed,
}

impl Phase {
    fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Unsubmitted, Phase::Submitted)
                | (Phase::Submitted, Phase::Ready)
                | (Phase::Ready, Phase::Running)
                | (Phase::Running, Phase::Completed)
        )
    }
}

#[derive(Clone, Debug)]
struct TaskStateEntry {
    phase: Phase,
    remaining_deps: usize,
}

/// Tracks the lifecycle phase and outstanding-dependency count of every
/// task in a [`Trace`].
pub struct TaskStateMonitor<'t> {
    trace: &'t Trace,
    entries: HashMap<TaskId, TaskStateEntry>,
}

impl<'t> TaskStateMonitor<'t> {
    pub fn new(trace: &'t Trace) -> Self {
        let entries = trace
            .tasks()
            .map(|task| {
                (
                    task.id,
                    TaskStateEntry {
                        phase: Phase::Unsubmitted,
                        remaining_deps: task.dependencies.len(),
                    },
                )
            })
            .collect();
        TaskStateMonitor { trace, entries }
    }

    fn entry(&self, task: TaskId) -> Result<&TaskStateEntry, EngineError> {
        self.entries.get(&task).ok_or(EngineError::UnknownTask(task))
    }

    fn entry_mut(&mut self, task: TaskId) -> Result<&mut TaskStateEntry, EngineError> {
        self.entries
            .get_mut(&task)
            .ok_or(EngineError::UnknownTask(task))
    }

    pub fn phase(&self, task: TaskId) -> Result<Phase, EngineError> {
        Ok(self.entry(task)?.phase)
    }

    pub fn remaining_deps(&self, task: TaskId) -> Result<usize, EngineError> {
        Ok(self.entry(task)?.remaining_deps)
    }

    fn advance(&mut self, task: TaskId, next: Phase) -> Result<(), EngineError> {
        let entry = self.entry_mut(task)?;
        if !entry.phase.can_advance_to(next) {
            return Err(EngineError::LifecycleViolation {
                task,
                from: entry.phase,
                to: next,
            });
        }
        entry.phase = next;
        Ok(())
    }

    /// Marks `task` submitted and recomputes its outstanding-dependency
    /// count from the live phase of each dependency: a dependency with an
    /// earlier submission time may already be `Completed` by the time
    /// `task` submits, so the count can't simply be `dependencies.len()`.
    pub fn mark_submitted(&mut self, task: TaskId) -> Result<(), EngineError> {
        let deps: Vec<TaskId> = self
            .trace
            .task(task)
            .ok_or(EngineError::UnknownTask(task))?
            .dependencies
            .clone();
        let mut remaining = 0usize;
        for dep in deps {
            if self.phase(dep)? != Phase::Completed {
                remaining += 1;
            }
        }
        self.advance(task, Phase::Submitted)?;
        self.entry_mut(task)?.remaining_deps = remaining;
        Ok(())
    }

    pub fn mark_ready(&mut self, task: TaskId) -> Result<(), EngineError> {
        self.advance(task, Phase::Ready)
    }

    pub fn mark_running(&mut self, task: TaskId) -> Result<(), EngineError> {
        self.advance(task, Phase::Running)
    }

    pub fn mark_completed(&mut self, task: TaskId) -> Result<(), EngineError> {
        self.advance(task, Phase::Completed)
    }

    /// Notifies the monitor that `dependency` has completed, decrementing
    /// the outstanding count of `dependent` if `dependent` is currently
    /// `Submitted` (an `Unsubmitted` dependent will compute a fresh count
    /// when it submits; anything past `Submitted` has already had its
    /// count driven to zero). Returns `true` if this was the dependent's
    /// last outstanding dependency.
    pub fn on_dependency_completed(&mut self, dependent: TaskId) -> Result<bool, EngineError> {
        let entry = self.entry_mut(dependent)?;
        if entry.phase != Phase::Submitted {
            return Ok(false);
        }
        debug_assert!(entry.remaining_deps > 0);
        entry.remaining_deps = entry.remaining_deps.saturating_sub(1);
        Ok(entry.remaining_deps == 0)
    }
}
