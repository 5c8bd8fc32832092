//! Command line argument parsing.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

/// Discrete-event simulation of a workflow task trace against a cluster
/// of machines under a configurable ordering and placement policy.
#[derive(Parser, Debug)]
#[command(name = "wtasim", about = "Workflow trace archive discrete-event simulator")]
#[command(group(
    ArgGroup::new("sizing")
        .args(["machines", "utilization"])
        .required(true)
))]
pub struct Args {
    /// Trace file(s) or director(ies) of trace files to simulate.
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Directory the task and workflow TSV reports are written to.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Explicit machine count. Mutually exclusive with `--utilization`.
    #[arg(long)]
    pub machines: Option<u32>,

    /// Target utilization in (0, 1]; the machine count is sized to hit it.
    /// Mutually exclusive with `--machines`.
    #[arg(long)]
    pub utilization: Option<f64>,

    /// CPU cores per machine. Raised automatically if a task demands more.
    #[arg(long, default_value_t = 1)]
    pub cores_per_machine: u32,

    /// Memory per machine, in megabytes. Reserved for a future revision;
    /// parsed and stored but never enforced by the simulation core.
    #[arg(long)]
    pub memory_per_machine: Option<u64>,

    /// Machine-placement policy name.
    #[arg(long, default_value = "best-fit")]
    pub placement_policy: String,

    /// Task-ordering policy name.
    #[arg(long, default_value = "fcfs")]
    pub order_policy: String,

    /// Retain only a deterministic fraction of workflows (and all of their
    /// member tasks) from the input trace.
    #[arg(long)]
    pub sample_fraction: Option<f64>,

    /// Turn on verbose logging. Repeat to increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Sets the logging to write to a file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
