mod support;

use std::fs;
use std::path::Path;
use std::time::Duration;

use tempfile::tempdir;

use support::{SAMPLE_REPORT, allocate_port, run_swarmperf, spawn_swarmperf, wait_for_listener};

#[cfg(unix)]
fn write_fake_tool(dir: &Path) -> Result<String, String> {
    use std::os::unix::fs::PermissionsExt;

    let report = dir.join("report.txt");
    fs::write(&report, SAMPLE_REPORT).map_err(|err| format!("write report failed: {}", err))?;
    let tool = dir.join("fake-httperf");
    fs::write(
        &tool,
        format!("#!/bin/sh\ncat '{}'\n", report.to_string_lossy()),
    )
    .map_err(|err| format!("write tool failed: {}", err))?;
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755))
        .map_err(|err| format!("chmod tool failed: {}", err))?;
    Ok(tool.to_string_lossy().into_owned())
}

fn read_single_line(path: &Path) -> Result<String, String> {
    let content = fs::read_to_string(path)
        .map_err(|err| format!("read {} failed: {}", path.display(), err))?;
    let lines: Vec<&str> = content.lines().collect();
    match lines.as_slice() {
        [line] => Ok((*line).to_owned()),
        _ => Err(format!("Expected one line in {}, got {:?}", path.display(), lines)),
    }
}

#[cfg(unix)]
#[test]
fn e2e_controller_aggregates_two_agents() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let tool = write_fake_tool(dir.path())?;

    let mut workers = Vec::new();
    let mut agents = Vec::new();
    for _ in 0..2 {
        let addr = format!("127.0.0.1:{}", allocate_port()?);
        agents.push(spawn_swarmperf(
            dir.path(),
            ["agent", "--listen", addr.as_str(), "--tool", tool.as_str()],
        )?);
        wait_for_listener(&addr, Duration::from_secs(10))?;
        workers.push(addr);
    }

    let mut args = vec!["controller".to_owned()];
    for worker in &workers {
        args.push("--worker".to_owned());
        args.push(worker.clone());
    }
    args.extend(
        [
            "--host",
            "localhost",
            "--port",
            "8080",
            "--records",
            "records.csv",
            "--summary-log",
            "summary.log",
            "--call-timeout",
            "30s",
        ]
        .map(str::to_owned),
    );
    let output = run_swarmperf(dir.path(), &args)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() {
        return Err(format!(
            "controller failed: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    if !stdout.contains("Workers: 2") || !stdout.contains("Total Requests: 200") {
        return Err(format!("Unexpected controller output: {}", stdout));
    }
    if !stdout.contains("Success Rate: 100.00%") {
        return Err(format!("Unexpected success rate: {}", stdout));
    }
    let worker_lines: Vec<&str> = stdout
        .lines()
        .filter(|line| line.starts_with("Worker "))
        .collect();
    if worker_lines.len() != 2 || worker_lines.iter().any(|line| !line.contains(": 100 requests")) {
        return Err(format!("Unexpected per-worker lines: {:?}", worker_lines));
    }

    let summary = read_single_line(&dir.path().join("summary.log"))?;
    let fields: Vec<&str> = summary.split(',').collect();
    if fields.len() != 49 || fields.get(1) != Some(&"200") || fields.get(9) != Some(&"0.7") {
        return Err(format!("Unexpected summary line {}", summary));
    }

    let records = fs::read_to_string(dir.path().join("records.csv"))
        .map_err(|err| format!("read records failed: {}", err))?;
    if records.lines().count() != 3 || !records.starts_with("run_id,timestamp_ms,host,") {
        return Err(format!("Unexpected records export {}", records));
    }

    let output = run_swarmperf(
        dir.path(),
        ["aggregate", "records.csv", "--summary-log", "replayed.log"],
    )?;
    if !output.status.success() {
        return Err(format!(
            "aggregate failed: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    let replayed = read_single_line(&dir.path().join("replayed.log"))?;
    if replayed != summary {
        return Err(format!("Re-aggregation differs: {} vs {}", replayed, summary));
    }

    drop(agents);
    Ok(())
}

#[test]
fn e2e_controller_fails_without_reachable_workers() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let worker = format!("127.0.0.1:{}", allocate_port()?);
    let output = run_swarmperf(
        dir.path(),
        [
            "controller",
            "--worker",
            worker.as_str(),
            "--host",
            "localhost",
            "--summary-log",
            "summary.log",
        ],
    )?;
    if output.status.success() {
        return Err("Controller must fail when a worker is unreachable".to_owned());
    }
    if dir.path().join("summary.log").exists() {
        return Err("Failed run must not write the summary log".to_owned());
    }
    Ok(())
}
