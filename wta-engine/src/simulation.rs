//! The simulation core: the event loop that ties the task-state monitor,
//! machine-state table, and the two pluggable policies together.

use wta_model::{Environment, MachineId, TaskId, Trace};
use wta_policies::ordering::OrderingPolicy;
use wta_policies::placement::{Candidate, PlacementPolicy};

use crate::error::EngineError;
use crate::event::{EventKind, EventQueue};
use crate::machine_state::MachineStateTable;
use crate::observer::SimulationObserver;
use crate::task_state::TaskStateMonitor;

/// Drives a [`Trace`] to completion against an [`Environment`], under one
/// ordering policy and one placement policy, notifying every registered
/// observer as state changes.
///
/// Scheduling is head-of-line: each tick considers only the
/// highest-priority ready task. If the placement policy cannot find it a
/// machine, the tick stops there — later-priority tasks are not considered
/// for placement ahead of it, even if they would fit. The queue unblocks
/// itself the next time a completion frees capacity.
pub struct Simulation<'t, 'e> {
    trace: &'t Trace,
    environment: &'e Environment,
    queue: EventQueue,
    monitor: TaskStateMonitor<'t>,
    machines: MachineStateTable,
    ordering: Box<dyn OrderingPolicy + 't>,
    placement: Box<dyn PlacementPolicy>,
    observers: Vec<Box<dyn SimulationObserver>>,
    clock: u64,
    tick_scheduled_at: Option<u64>,
    last_tick_notified: Option<u64>,
}

impl<'t, 'e> Simulation<'t, 'e> {
    pub fn new(
        trace: &'t Trace,
        environment: &'e Environment,
        ordering: Box<dyn OrderingPolicy + 't>,
        placement: Box<dyn PlacementPolicy>,
        observers: Vec<Box<dyn SimulationObserver>>,
    ) -> Self {
        let mut queue = EventQueue::new();
        for task in trace.tasks() {
            queue.push(task.submission_time, EventKind::TaskSubmitted(task.id));
        }
        Simulation {
            trace,
            environment,
            queue,
            monitor: TaskStateMonitor::new(trace),
            machines: MachineStateTable::new(environment),
            ordering,
            placement,
            observers,
            clock: 0,
            tick_scheduled_at: None,
            last_tick_notified: None,
        }
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn environment(&self) -> &Environment {
        self.environment
    }

    /// Runs every event to exhaustion, returning the clock value of the
    /// last event processed (the simulation's makespan).
    pub fn run(&mut self) -> Result<u64, EngineError> {
        while let Some(event) = self.queue.pop() {
            if event.timestamp < self.clock {
                return Err(EngineError::TemporalRegression {
                    clock: self.clock,
                    event_time: event.timestamp,
                });
            }
            self.clock = event.timestamp;
            self.notify_tick();

            match event.kind {
                EventKind::TaskSubmitted(task) => self.handle_task_submitted(task)?,
                EventKind::TaskReady(task) => self.handle_task_ready(task)?,
                EventKind::ScheduleTick => self.handle_schedule_tick()?,
                EventKind::TaskCompleted(task, machine) => {
                    self.handle_task_completed(task, machine)?
                }
                EventKind::TaskStarted(..) => {}
            }
        }
        Ok(self.clock)
    }

    fn notify_tick(&mut self) {
        if self.last_tick_notified != Some(self.clock) {
            self.last_tick_notified = Some(self.clock);
            for observer in &mut self.observers {
                observer.on_tick(self.clock);
            }
        }
    }

    fn task(&self, id: TaskId) -> Result<&wta_model::Task, EngineError> {
        self.trace.task(id).ok_or(EngineError::UnknownTask(id))
    }

    fn schedule_tick_if_needed(&mut self, at: u64) {
        if self.tick_scheduled_at != Some(at) {
            self.queue.push(at, EventKind::ScheduleTick);
            self.tick_scheduled_at = Some(at);
        }
    }

    fn handle_task_submitted(&mut self, task: TaskId) -> Result<(), EngineError> {
        self.monitor.mark_submitted(task)?;
        for observer in &mut self.observers {
            observer.on_task_submitted(task, self.clock);
        }
        if self.monitor.remaining_deps(task)? == 0 {
            self.queue.push(self.clock, EventKind::TaskReady(task));
        }
        Ok(())
    }

    fn handle_task_ready(&mut self, task: TaskId) -> Result<(), EngineError> {
        self.monitor.mark_ready(task)?;
        for observer in &mut self.observers {
            observer.on_task_ready(task, self.clock);
        }
        self.ordering.register_ready(task);
        let now = self.clock;
        self.schedule_tick_if_needed(now);
        Ok(())
    }

    fn handle_schedule_tick(&mut self) -> Result<(), EngineError> {
        self.tick_scheduled_at = None;
        loop {
            let Some(candidate) = self.ordering.next_candidate() else {
                break;
            };
            let demand = self.task(candidate)?.cpu_demand;
            let runtime = self.task(candidate)?.runtime;
            let candidates: Vec<Candidate> = self
                .machines
                .candidates(demand)
                .into_iter()
                .map(|(machine, free_cpus)| Candidate { machine, free_cpus })
                .collect();
            let Some(machine) = self.placement.select_machine(demand, &candidates) else {
                break;
            };

            self.machines.reserve(machine, candidate, demand)?;
            self.monitor.mark_running(candidate)?;
            self.ordering.remove(candidate);
            for observer in &mut self.observers {
                observer.on_task_started(candidate, machine, self.clock);
            }
            self.queue.push(
                self.clock + runtime,
                EventKind::TaskCompleted(candidate, machine),
            );
        }
        Ok(())
    }

    fn handle_task_completed(
        &mut self,
        task: TaskId,
        machine: MachineId,
    ) -> Result<(), EngineError> {
        let demand = self.task(task)?.cpu_demand;
        self.machines.release(machine, task, demand)?;
        self.monitor.mark_completed(task)?;
        for observer in &mut self.observers {
            observer.on_task_completed(task, self.clock);
        }

        let dependents: Vec<TaskId> = self.trace.dependents_of(task).map(|t| t.id).collect();
        for dependent in dependents {
            if self.monitor.on_dependency_completed(dependent)? {
                self.queue.push(self.clock, EventKind::TaskReady(dependent));
            }
        }

        let now = self.clock;
        self.schedule_tick_if_needed(now);
        Ok(())
    }
}
