//! Builds the three named-provider registries this binary needs: one for
//! task-ordering policies, one for machine-placement policies, and one for
//! trace-reader formats. Each is a plain [`Registry`] built once here and
//! passed into the rest of the program — never a process-wide singleton,
//! per the simulator's design note on registries.

use wta_model::Trace;
use wta_policies::ordering::{EarliestWorkflowFirst, Fcfs, OrderingPolicy, ShortestJobFirst, WorkflowDeadlines};
use wta_policies::placement::{BestFit, PlacementPolicy};
use wta_reader::{TabularReader, TraceReader};
use wta_registry::Registry;

pub fn placement_registry() -> Registry<Box<dyn PlacementPolicy>> {
    let mut registry = Registry::new();
    registry.register("best-fit", || Box::new(BestFit::new()) as Box<dyn PlacementPolicy>);
    registry.set_default("best-fit");
    registry
}

pub fn reader_registry() -> Registry<Box<dyn TraceReader>> {
    let mut registry = Registry::new();
    registry.register("tabular", || Box::new(TabularReader) as Box<dyn TraceReader>);
    registry.set_default("tabular");
    registry
}

/// Builds the ordering-policy registry. `trace` and `deadlines` are
/// captured by reference in every factory closure, so every policy this
/// registry can produce borrows for exactly as long as `'t`.
pub fn ordering_registry<'t>(
    trace: &'t Trace,
    deadlines: &'t dyn WorkflowDeadlines,
) -> Registry<Box<dyn OrderingPolicy + 't>> {
    let mut registry: Registry<Box<dyn OrderingPolicy + 't>> = Registry::new();
    registry.register("fcfs", move || Box::new(Fcfs::new(trace)) as Box<dyn OrderingPolicy + 't>);
    registry.register("sjf", move || {
        Box::new(ShortestJobFirst::new(trace)) as Box<dyn OrderingPolicy + 't>
    });
    registry.register("ewf", move || {
        Box::new(EarliestWorkflowFirst::new(trace, deadlines)) as Box<dyn OrderingPolicy + 't>
    });
    registry.set_default("fcfs");
    registry
}
