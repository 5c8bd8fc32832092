//! The discrete-event simulation core.
//!
//! This crate owns the one piece of mutable runtime state the whole
//! simulator revolves around: which phase each task is in, how many CPUs
//! each machine has free, and the event queue driving both forward. Everything
//! upstream ([`wta_model`]) is immutable trace data; everything downstream
//! ([`wta_stats`](../wta_stats), `wta-cli`) only ever reacts to the
//! [`observer::SimulationObserver`] notifications this crate emits.

mod error;
mod event;
mod machine_state;
mod observer;
mod simulation;
mod task_state;

pub use error::EngineError;
pub use event::{Event, EventKind, EventQueue};
pub use machine_state::MachineStateTable;
pub use observer::SimulationObserver;
pub use simulation::Simulation;
pub use task_state::{Phase, TaskStateMonitor};
