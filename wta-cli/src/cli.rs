//! Orchestrates one simulation run: load the trace, size the environment,
//! build the chosen policies, run the simulation core to completion, run
//! the post-run sanity check, and write the TSV reports.

use log::info;

use wta_engine::{Simulation, SimulationObserver};
use wta_env::{build_environment, Sizing};
use wta_policies::placement::PlacementPolicy;
use wta_stats::{TaskStatsCollector, WorkflowStatsCollector};

use crate::args::Args;
use crate::logging_observer::LoggingObserver;
use crate::progress::ProgressReporter;
use crate::registries::{ordering_registry, placement_registry, reader_registry};
use crate::sanity;
use crate::shared_observer::Shared;

pub fn run(args: Args) -> Result<(), String> {
    let sizing = match (args.machines, args.utilization) {
        (Some(n), None) => Sizing::Explicit(n),
        (None, Some(rho)) => Sizing::Utilization(rho),
        _ => {
            return Err("exactly one of --machines or --utilization must be given".to_string())
        }
    };

    let readers = reader_registry();
    let reader = readers.default_provider().map_err(|e| e.to_string())?;
    let trace = reader
        .read(&args.input, args.sample_fraction)
        .map_err(|e| e.to_string())?;
    info!(
        "loaded trace: {} task(s) across {} workflow(s)",
        trace.len(),
        trace.workflows().len()
    );
    // The engine trusts its caller to hand it a DAG: a cycle would make
    // every member task wait on a dependency that never completes, and
    // the simulation would simply stop advancing. Catch it here instead.
    wta_model::dag::topological_order(&trace).map_err(|e| e.to_string())?;

    let environment = build_environment(&trace, sizing, args.cores_per_machine)
        .map_err(|e| e.to_string())?;
    info!("environment sized to {} machine(s)", environment.machines().len());

    let (task_stats_rc, task_stats_observer) = Shared::new(TaskStatsCollector::new(&trace));
    let (workflow_stats_rc, workflow_stats_observer) =
        Shared::new(WorkflowStatsCollector::new(&trace));
    // Same underlying collector, handed to the observer list and to the
    // ordering registry's EWF factory: the explicit deadline handshake.
    let deadlines = Shared(workflow_stats_rc.clone());

    let placements = placement_registry();
    let placement: Box<dyn PlacementPolicy> = placements
        .get(&args.placement_policy)
        .map_err(|e| e.to_string())?;

    let orderings = ordering_registry(&trace, &deadlines);
    let ordering = orderings.get(&args.order_policy).map_err(|e| e.to_string())?;

    let mut observers: Vec<Box<dyn SimulationObserver>> = vec![
        Box::new(task_stats_observer),
        Box::new(workflow_stats_observer),
        Box::new(ProgressReporter::new(trace.len())),
    ];
    if args.verbose > 0 {
        observers.push(Box::new(LoggingObserver));
    }

    let mut simulation = Simulation::new(&trace, &environment, ordering, placement, observers);
    let makespan = simulation.run().map_err(|e| e.to_string())?;
    info!("simulation completed, makespan {makespan}");

    let violations = {
        let task_stats = task_stats_rc.borrow();
        sanity::check(&trace, &task_stats)
    };
    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("sanity violation: {violation}");
        }
        return Err(format!("{} sanity violation(s) found", violations.len()));
    }

    std::fs::create_dir_all(&args.output_dir).map_err(|e| {
        format!(
            "unable to create output directory {}: {e}",
            args.output_dir.display()
        )
    })?;
    let task_report = args.output_dir.join("tasks.tsv");
    let workflow_report = args.output_dir.join("workflows.tsv");
    task_stats_rc
        .borrow()
        .write_tsv(&task_report)
        .map_err(|e| e.to_string())?;
    workflow_stats_rc
        .borrow()
        .write_tsv(&workflow_report)
        .map_err(|e| e.to_string())?;

    info!(
        "wrote {} and {}",
        task_report.display(),
        workflow_report.display()
    );
    Ok(())
}
