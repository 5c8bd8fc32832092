//! A shared handle for observers the host needs to keep reading after
//! handing them to [`wta_engine::Simulation`], which otherwise takes
//! ownership of every observer it's given.
//!
//! This is the same `Rc<RefCell<_>>` pattern `wta-engine`'s own test
//! harness uses to inspect an observer's recorded state after a run
//! completes; the CLI needs it for two separate reasons: writing a TSV
//! report from a stats collector after the loop returns, and handing the
//! *same* workflow-statistics instance to both the observer list and the
//! EWF ordering policy's constructor (the explicit handshake the
//! simulator's design notes call for).

use std::cell::RefCell;
use std::rc::Rc;

use wta_engine::SimulationObserver;
use wta_model::{MachineId, TaskId, WorkflowId};
use wta_policies::ordering::WorkflowDeadlines;

pub struct Shared<T>(pub Rc<RefCell<T>>);

impl<T> Shared<T> {
    /// Wraps `inner`, returning both the shared handle (to read from
    /// later) and a `Shared<T>` ready to register as an observer.
    pub fn new(inner: T) -> (Rc<RefCell<T>>, Shared<T>) {
        let rc = Rc::new(RefCell::new(inner));
        (rc.clone(), Shared(rc))
    }
}

impl<T: SimulationObserver> SimulationObserver for Shared<T> {
    fn on_task_submitted(&mut self, task: TaskId, now: u64) {
        self.0.borrow_mut().on_task_submitted(task, now);
    }

    fn on_task_ready(&mut self, task: TaskId, now: u64) {
        self.0.borrow_mut().on_task_ready(task, now);
    }

    fn on_task_started(&mut self, task: TaskId, machine: MachineId, now: u64) {
        self.0.borrow_mut().on_task_started(task, machine, now);
    }

    fn on_task_completed(&mut self, task: TaskId, now: u64) {
        self.0.borrow_mut().on_task_completed(task, now);
    }

    fn on_tick(&mut self, now: u64) {
        self.0.borrow_mut().on_tick(now);
    }
}

impl<T: WorkflowDeadlines> WorkflowDeadlines for Shared<T> {
    fn deadline(&self, workflow: WorkflowId) -> u64 {
        self.0.borrow().deadline(workflow)
    }
}
