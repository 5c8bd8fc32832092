//! The [`Trace`]: the owning collection of all tasks and workflows loaded
//! for a single simulation run.

use std::collections::{HashMap, HashSet};

use crate::error::ModelError;
use crate::ids::{TaskId, WorkflowId};
use crate::task::Task;
use crate::workflow::Workflow;

/// Owns every [`Task`] and [`Workflow`] for a simulation run and provides
/// indexed lookup by id.
///
/// Construction validates referential integrity (no duplicate task ids, no
/// dependency on an unknown task, no task referencing an unknown workflow)
/// but does **not** check for dependency cycles — cycle detection is a
/// whole-DAG concern left to callers that need a topological order (see
/// [`crate::dag`]), since the engine itself never needs one: it only ever
/// asks "how many of my dependencies remain incomplete".
#[derive(Debug, Default)]
pub struct Trace {
    tasks: Vec<Task>,
    workflows: Vec<Workflow>,
    task_index: HashMap<TaskId, usize>,
    workflow_index: HashMap<WorkflowId, usize>,
}

impl Trace {
    pub fn new() -> Self {
        Trace::default()
    }

    /// Builds a trace from a flat list of tasks, deriving workflow
    /// membership from each task's `workflow` field.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, ModelError> {
        let mut trace = Trace::new();
        let mut seen: HashSet<TaskId> = HashSet::new();
        let mut members: HashMap<WorkflowId, Vec<TaskId>> = HashMap::new();

        for task in &tasks {
            if !seen.insert(task.id) {
                return Err(ModelError::DuplicateTask(task.id));
            }
            members.entry(task.workflow).or_default().push(task.id);
        }

        for task in &tasks {
            for dep in &task.dependencies {
                if !seen.contains(dep) {
                    return Err(ModelError::UnknownDependency(task.id, *dep));
                }
            }
        }

        let task_index = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, i))
            .collect::<HashMap<_, _>>();
        trace.tasks = tasks;
        trace.task_index = task_index;

        let mut workflow_ids: Vec<WorkflowId> = members.keys().copied().collect();
        workflow_ids.sort();
        for workflow_id in workflow_ids {
            let mut task_ids = members.remove(&workflow_id).unwrap_or_default();
            task_ids.sort();
            trace.push_workflow(Workflow::new(workflow_id, task_ids));
        }

        Ok(trace)
    }

    fn push_workflow(&mut self, workflow: Workflow) {
        self.workflow_index.insert(workflow.id, self.workflows.len());
        self.workflows.push(workflow);
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.task_index.get(&id).map(|&i| &self.tasks[i])
    }

    pub fn workflow(&self, id: WorkflowId) -> Option<&Workflow> {
        self.workflow_index.get(&id).map(|&i| &self.workflows[i])
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks with no dependencies: the DAG roots.
    pub fn roots(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_root())
    }

    /// Tasks that depend (directly) on `id`, in trace order.
    pub fn dependents_of(&self, id: TaskId) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.dependencies.contains(&id))
    }
}
