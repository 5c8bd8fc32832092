//! End-to-end simulation scenarios.
//!
//! Each test builds a small trace and environment, runs it to completion,
//! and checks an outcome that only holds if the engine's ordering,
//! placement, and lifecycle bookkeeping all agree with each other.

use std::cell::RefCell;
use std::rc::Rc;

use wta_engine::{Simulation, SimulationObserver};
use wta_model::{Environment, Task, TaskId, Trace, WorkflowId};
use wta_policies::ordering::{Fcfs, ShortestJobFirst};
use wta_policies::placement::BestFit;

fn task(id: u32, submission: u64, runtime: u64, cpus: u32, deps: Vec<u32>) -> Task {
    Task::new(
        TaskId(id),
        WorkflowId(0),
        submission,
        runtime,
        cpus,
        deps.into_iter().map(TaskId).collect(),
    )
}

#[derive(Default)]
struct Timeline {
    starts: Vec<(TaskId, u64)>,
    completions: Vec<(TaskId, u64)>,
}

impl SimulationObserver for Timeline {
    fn on_task_started(&mut self, task: TaskId, _machine: wta_model::MachineId, now: u64) {
        self.starts.push((task, now));
    }

    fn on_task_completed(&mut self, task: TaskId, now: u64) {
        self.completions.push((task, now));
    }
}

#[derive(Default)]
struct TickRecorder {
    ticks: Vec<u64>,
    any_other_callback: bool,
}

impl SimulationObserver for TickRecorder {
    fn on_task_submitted(&mut self, _task: TaskId, _now: u64) {
        self.any_other_callback = true;
    }

    fn on_task_ready(&mut self, _task: TaskId, _now: u64) {
        self.any_other_callback = true;
    }

    fn on_task_started(&mut self, _task: TaskId, _machine: wta_model::MachineId, _now: u64) {
        self.any_other_callback = true;
    }

    fn on_task_completed(&mut self, _task: TaskId, _now: u64) {
        self.any_other_callback = true;
    }

    fn on_tick(&mut self, now: u64) {
        self.ticks.push(now);
    }
}

/// An observer handle shared with the test body, so assertions can inspect
/// what was recorded after the simulation (which owns the observer list)
/// has finished running.
struct Shared(Rc<RefCell<Timeline>>);

impl SimulationObserver for Shared {
    fn on_task_started(&mut self, task: TaskId, machine: wta_model::MachineId, now: u64) {
        self.0.borrow_mut().on_task_started(task, machine, now);
    }

    fn on_task_completed(&mut self, task: TaskId, now: u64) {
        self.0.borrow_mut().on_task_completed(task, now);
    }
}

#[test]
fn scenario_when_pipe_of_two_then_second_waits_for_first() {
    let trace = Trace::from_tasks(vec![task(0, 0, 10, 1, vec![]), task(1, 0, 5, 1, vec![0])]).unwrap();
    let env = Environment::single_cluster(1, 1);
    let timeline = Box::<Timeline>::default();
    let mut sim = Simulation::new(
        &trace,
        &env,
        Box::new(Fcfs::new(&trace)),
        Box::new(BestFit::new()),
        vec![timeline],
    );
    assert_eq!(sim.run().unwrap(), 15);
}

#[test]
fn scenario_when_parallel_pair_both_fit_then_concurrent() {
    let trace = Trace::from_tasks(vec![task(0, 0, 10, 1, vec![]), task(1, 0, 10, 1, vec![])]).unwrap();
    let env = Environment::single_cluster(1, 2);
    let mut sim = Simulation::new(
        &trace,
        &env,
        Box::new(Fcfs::new(&trace)),
        Box::new(BestFit::new()),
        vec![],
    );
    assert_eq!(sim.run().unwrap(), 10);
}

#[test]
fn scenario_when_best_fit_tie_then_lowest_machine_id_chosen() {
    // Every machine in a single cluster has identical free capacity, so
    // best-fit's tie-break (lowest machine id) is the only thing that
    // decides placement here.
    let trace = Trace::from_tasks(vec![task(0, 0, 10, 2, vec![])]).unwrap();
    let env = Environment::single_cluster(3, 2);
    let timeline = Rc::new(RefCell::new(Timeline::default()));
    let mut sim = Simulation::new(
        &trace,
        &env,
        Box::new(Fcfs::new(&trace)),
        Box::new(BestFit::new()),
        vec![Box::new(Shared(timeline.clone()))],
    );
    sim.run().unwrap();
    assert_eq!(timeline.borrow().starts, vec![(TaskId(0), 0)]);
}

#[test]
fn scenario_when_sjf_then_shorter_task_runs_first() {
    let trace = Trace::from_tasks(vec![
        task(0, 0, 20, 1, vec![]),
        task(1, 0, 5, 1, vec![]),
    ])
    .unwrap();
    let env = Environment::single_cluster(1, 1);
    let timeline = Rc::new(RefCell::new(Timeline::default()));
    let mut sim = Simulation::new(
        &trace,
        &env,
        Box::new(ShortestJobFirst::new(&trace)),
        Box::new(BestFit::new()),
        vec![Box::new(Shared(timeline.clone()))],
    );
    sim.run().unwrap();
    // task 1 (runtime 5) should start before task 0 (runtime 20) despite
    // task 0 having the lower id, since only one CPU is available.
    let starts = timeline.borrow().starts.clone();
    assert_eq!(starts[0].0, TaskId(1));
    assert_eq!(starts[1].0, TaskId(0));
}

#[test]
fn scenario_when_completion_and_submission_tie_then_completion_processed_first() {
    // Task 0 completes at t=10 and frees the machine's only CPU in the
    // same instant that task 1 is submitted at t=10. Task 1 must be able
    // to claim that freed capacity within the same tick.
    let trace = Trace::from_tasks(vec![
        task(0, 0, 10, 1, vec![]),
        task(1, 10, 5, 1, vec![]),
    ])
    .unwrap();
    let env = Environment::single_cluster(1, 1);
    let mut sim = Simulation::new(
        &trace,
        &env,
        Box::new(Fcfs::new(&trace)),
        Box::new(BestFit::new()),
        vec![],
    );
    assert_eq!(sim.run().unwrap(), 15);
}

#[test]
fn scenario_when_backpressure_then_queued_task_waits_for_capacity() {
    let trace = Trace::from_tasks(vec![
        task(0, 0, 10, 2, vec![]),
        task(1, 0, 1, 2, vec![]),
    ])
    .unwrap();
    let env = Environment::single_cluster(1, 2);
    let mut sim = Simulation::new(
        &trace,
        &env,
        Box::new(Fcfs::new(&trace)),
        Box::new(BestFit::new()),
        vec![],
    );
    assert_eq!(sim.run().unwrap(), 11);
}

#[test]
fn scenario_when_run_twice_on_same_inputs_then_identical_makespan() {
    let build = || {
        Trace::from_tasks(vec![
            task(0, 0, 7, 1, vec![]),
            task(1, 2, 3, 1, vec![]),
            task(2, 2, 3, 1, vec![0, 1]),
        ])
        .unwrap()
    };
    let env = Environment::single_cluster(1, 1);

    let trace_a = build();
    let mut sim_a = Simulation::new(
        &trace_a,
        &env,
        Box::new(Fcfs::new(&trace_a)),
        Box::new(BestFit::new()),
        vec![],
    );
    let trace_b = build();
    let mut sim_b = Simulation::new(
        &trace_b,
        &env,
        Box::new(Fcfs::new(&trace_b)),
        Box::new(BestFit::new()),
        vec![],
    );

    assert_eq!(sim_a.run().unwrap(), sim_b.run().unwrap());
}

#[test]
fn scenario_when_single_task_at_exact_capacity_then_runs_immediately() {
    let trace = Trace::from_tasks(vec![task(0, 0, 4, 4, vec![])]).unwrap();
    let env = Environment::single_cluster(1, 4);
    let mut sim = Simulation::new(
        &trace,
        &env,
        Box::new(Fcfs::new(&trace)),
        Box::new(BestFit::new()),
        vec![],
    );
    assert_eq!(sim.run().unwrap(), 4);
}

#[test]
fn scenario_when_runtime_zero_then_completes_on_start_tick() {
    let trace = Trace::from_tasks(vec![task(0, 0, 0, 1, vec![])]).unwrap();
    let env = Environment::single_cluster(1, 1);
    let timeline = Rc::new(RefCell::new(Timeline::default()));
    let mut sim = Simulation::new(
        &trace,
        &env,
        Box::new(Fcfs::new(&trace)),
        Box::new(BestFit::new()),
        vec![Box::new(Shared(timeline.clone()))],
    );
    assert_eq!(sim.run().unwrap(), 0);
    assert_eq!(timeline.borrow().starts, vec![(TaskId(0), 0)]);
    assert_eq!(timeline.borrow().completions, vec![(TaskId(0), 0)]);
}

#[test]
fn scenario_when_trace_empty_then_no_callbacks_at_all() {
    let trace = Trace::from_tasks(vec![]).unwrap();
    let env = Environment::single_cluster(1, 1);
    let recorder = Rc::new(RefCell::new(TickRecorder::default()));
    struct SharedTick(Rc<RefCell<TickRecorder>>);
    impl SimulationObserver for SharedTick {
        fn on_task_submitted(&mut self, task: TaskId, now: u64) {
            self.0.borrow_mut().on_task_submitted(task, now);
        }
        fn on_task_ready(&mut self, task: TaskId, now: u64) {
            self.0.borrow_mut().on_task_ready(task, now);
        }
        fn on_task_started(&mut self, task: TaskId, machine: wta_model::MachineId, now: u64) {
            self.0.borrow_mut().on_task_started(task, machine, now);
        }
        fn on_task_completed(&mut self, task: TaskId, now: u64) {
            self.0.borrow_mut().on_task_completed(task, now);
        }
        fn on_tick(&mut self, now: u64) {
            self.0.borrow_mut().on_tick(now);
        }
    }
    let mut sim = Simulation::new(
        &trace,
        &env,
        Box::new(Fcfs::new(&trace)),
        Box::new(BestFit::new()),
        vec![Box::new(SharedTick(recorder.clone()))],
    );
    assert_eq!(sim.run().unwrap(), 0);
    assert!(recorder.borrow().ticks.is_empty());
    assert!(!recorder.borrow().any_other_callback);
}

#[test]
fn scenario_when_conservation_checked_then_started_equals_completed_equals_task_count() {
    let trace = Trace::from_tasks(vec![
        task(0, 0, 3, 1, vec![]),
        task(1, 0, 2, 1, vec![]),
        task(2, 5, 1, 1, vec![0, 1]),
    ])
    .unwrap();
    let env = Environment::single_cluster(1, 1);
    let timeline = Rc::new(RefCell::new(Timeline::default()));
    let mut sim = Simulation::new(
        &trace,
        &env,
        Box::new(Fcfs::new(&trace)),
        Box::new(BestFit::new()),
        vec![Box::new(Shared(timeline.clone()))],
    );
    sim.run().unwrap();
    assert_eq!(timeline.borrow().starts.len(), trace.len());
    assert_eq!(timeline.borrow().completions.len(), trace.len());
    assert_eq!(timeline.borrow().starts.len(), timeline.borrow().completions.len());
}

#[test]
fn scenario_when_fcfs_strictly_ordered_and_fits_one_per_machine_then_starts_equal_submissions() {
    let trace = Trace::from_tasks(vec![
        task(0, 0, 3, 1, vec![]),
        task(1, 4, 2, 1, vec![]),
        task(2, 9, 1, 1, vec![]),
    ])
    .unwrap();
    let env = Environment::single_cluster(3, 1);
    let timeline = Rc::new(RefCell::new(Timeline::default()));
    let mut sim = Simulation::new(
        &trace,
        &env,
        Box::new(Fcfs::new(&trace)),
        Box::new(BestFit::new()),
        vec![Box::new(Shared(timeline.clone()))],
    );
    sim.run().unwrap();
    let mut starts = timeline.borrow().starts.clone();
    starts.sort_by_key(|(id, _)| id.0);
    assert_eq!(starts, vec![(TaskId(0), 0), (TaskId(1), 4), (TaskId(2), 9)]);
}

#[test]
fn scenario_when_task_ids_reversed_then_start_end_pairs_unchanged_under_fcfs() {
    let build_forward = || {
        Trace::from_tasks(vec![
            task(0, 0, 3, 1, vec![]),
            task(1, 1, 2, 1, vec![]),
            task(2, 2, 4, 1, vec![]),
        ])
        .unwrap()
    };
    let build_reversed = || {
        Trace::from_tasks(vec![
            task(2, 0, 3, 1, vec![]),
            task(1, 1, 2, 1, vec![]),
            task(0, 2, 4, 1, vec![]),
        ])
        .unwrap()
    };
    let env = Environment::single_cluster(1, 1);

    let trace_fwd = build_forward();
    let timeline_fwd = Rc::new(RefCell::new(Timeline::default()));
    let mut sim_fwd = Simulation::new(
        &trace_fwd,
        &env,
        Box::new(Fcfs::new(&trace_fwd)),
        Box::new(BestFit::new()),
        vec![Box::new(Shared(timeline_fwd.clone()))],
    );
    sim_fwd.run().unwrap();

    let trace_rev = build_reversed();
    let timeline_rev = Rc::new(RefCell::new(Timeline::default()));
    let mut sim_rev = Simulation::new(
        &trace_rev,
        &env,
        Box::new(Fcfs::new(&trace_rev)),
        Box::new(BestFit::new()),
        vec![Box::new(Shared(timeline_rev.clone()))],
    );
    sim_rev.run().unwrap();

    // Submission order (by time), not task id, is what FCFS actually keys
    // off; swapping which id owns each submission time must not change
    // the set of (start, end) pairs the run produces.
    let mut starts_fwd: Vec<u64> = timeline_fwd.borrow().starts.iter().map(|(_, t)| *t).collect();
    let mut completions_fwd: Vec<u64> = timeline_fwd.borrow().completions.iter().map(|(_, t)| *t).collect();
    let mut starts_rev: Vec<u64> = timeline_rev.borrow().starts.iter().map(|(_, t)| *t).collect();
    let mut completions_rev: Vec<u64> = timeline_rev.borrow().completions.iter().map(|(_, t)| *t).collect();
    starts_fwd.sort_unstable();
    completions_fwd.sort_unstable();
    starts_rev.sort_unstable();
    completions_rev.sort_unstable();
    assert_eq!(starts_fwd, starts_rev);
    assert_eq!(completions_fwd, completions_rev);
}
