use assert_cmd::cargo;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

fn write_trace(dir: &std::path::Path, name: &str, rows: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        "task_id\tworkflow_id\tsubmission_time\truntime\tcpu_demand\tdependencies\n{rows}"
    )
    .unwrap();
    path
}

#[test]
fn run_when_valid_trace_then_writes_both_reports() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempfile::tempdir()?;
    let output_dir = tempfile::tempdir()?;
    let trace = write_trace(
        input_dir.path(),
        "trace.tsv",
        "0\t0\t0\t10\t1\t\n1\t0\t0\t5\t1\t0\n2\t1\t0\t3\t1\t\n",
    );

    let mut cmd = Command::new(cargo::cargo_bin!("wtasim"));
    cmd.arg(&trace)
        .arg("--output-dir")
        .arg(output_dir.path())
        .arg("--machines")
        .arg("2");
    cmd.assert().success();

    assert!(output_dir.path().join("tasks.tsv").exists());
    assert!(output_dir.path().join("workflows.tsv").exists());
    let tasks_tsv = std::fs::read_to_string(output_dir.path().join("tasks.tsv"))?;
    assert_eq!(tasks_tsv.lines().count(), 4);

    Ok(())
}

#[test]
fn run_when_utilization_given_then_sizes_environment() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempfile::tempdir()?;
    let output_dir = tempfile::tempdir()?;
    let trace = write_trace(input_dir.path(), "trace.tsv", "0\t0\t0\t10\t1\t\n");

    let mut cmd = Command::new(cargo::cargo_bin!("wtasim"));
    cmd.arg(&trace)
        .arg("--output-dir")
        .arg(output_dir.path())
        .arg("--utilization")
        .arg("0.5");
    cmd.assert().success();

    Ok(())
}

#[test]
fn run_when_both_sizing_flags_given_then_clap_rejects() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempfile::tempdir()?;
    let trace = write_trace(input_dir.path(), "trace.tsv", "0\t0\t0\t10\t1\t\n");

    let mut cmd = Command::new(cargo::cargo_bin!("wtasim"));
    cmd.arg(&trace).arg("--machines").arg("1").arg("--utilization").arg("0.5");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));

    Ok(())
}

#[test]
fn run_when_unknown_order_policy_then_clear_error() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempfile::tempdir()?;
    let trace = write_trace(input_dir.path(), "trace.tsv", "0\t0\t0\t10\t1\t\n");

    let mut cmd = Command::new(cargo::cargo_bin!("wtasim"));
    cmd.arg(&trace)
        .arg("--machines")
        .arg("1")
        .arg("--order-policy")
        .arg("not-a-policy");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not-a-policy"));

    Ok(())
}

#[test]
fn run_when_unknown_placement_policy_then_clear_error() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempfile::tempdir()?;
    let trace = write_trace(input_dir.path(), "trace.tsv", "0\t0\t0\t10\t1\t\n");

    let mut cmd = Command::new(cargo::cargo_bin!("wtasim"));
    cmd.arg(&trace)
        .arg("--machines")
        .arg("1")
        .arg("--placement-policy")
        .arg("not-a-policy");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not-a-policy"));

    Ok(())
}

#[test]
fn run_when_dependency_cycle_then_rejected_before_simulating(
) -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempfile::tempdir()?;
    // Task 0 depends on task 1 and task 1 depends on task 0.
    let trace = write_trace(
        input_dir.path(),
        "trace.tsv",
        "0\t0\t0\t10\t1\t1\n1\t0\t0\t5\t1\t0\n",
    );

    let mut cmd = Command::new(cargo::cargo_bin!("wtasim"));
    cmd.arg(&trace).arg("--machines").arg("1");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cycle").or(predicate::str::contains("Cycle")));

    Ok(())
}

#[test]
fn run_when_input_path_missing_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("wtasim"));
    cmd.arg("no/such/trace.tsv").arg("--machines").arg("1");
    cmd.assert().failure();

    Ok(())
}

#[test]
fn run_when_verbose_then_logs_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempfile::tempdir()?;
    let output_dir = tempfile::tempdir()?;
    let trace = write_trace(input_dir.path(), "trace.tsv", "0\t0\t0\t10\t1\t\n");

    let mut cmd = Command::new(cargo::cargo_bin!("wtasim"));
    cmd.arg(&trace)
        .arg("--output-dir")
        .arg(output_dir.path())
        .arg("--machines")
        .arg("1")
        .arg("-v")
        .arg("-v");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("simulation completed"));

    Ok(())
}
