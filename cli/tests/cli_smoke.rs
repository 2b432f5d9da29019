use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;

fn run_json(args: &[&str]) -> Value {
    let exe = assert_cmd::cargo_bin!("aqueduct");
    let output = Command::new(exe).args(args).output().expect("run aqueduct");
    assert!(
        output.status.success(),
        "aqueduct failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn cli_max_flow_example() {
    let out = run_json(&["max-flow", "--example"]);

    assert_eq!(out["algorithm"], "max-flow");
    assert_eq!(out["result"]["max_flow"].as_f64(), Some(14.0));
    assert_eq!(out["summary"]["total_capacity"].as_f64(), Some(61.0));
    assert_eq!(
        out["result"]["min_cut"],
        serde_json::json!(["A", "B", "C", "E"])
    );
}

#[test]
fn cli_mst_example() {
    let out = run_json(&["mst", "--example", "--pretty"]);

    assert_eq!(out["result"]["total_cost"].as_f64(), Some(15.0));
    assert_eq!(out["summary"]["edge_count"], 4);
    assert_eq!(out["summary"]["spanning"], true);
}

#[test]
fn cli_shortest_path_example_with_explicit_target() {
    let out = run_json(&["shortest-path", "--example", "--target", "5"]);

    assert_eq!(out["result"]["outcome"]["distance"].as_f64(), Some(20.0));
    assert_eq!(
        out["result"]["outcome"]["path"],
        serde_json::json!(["1", "3", "6", "5"])
    );
    assert_eq!(out["summary"]["hops"], 3);
}

#[test]
fn cli_target_defaults_to_last_node() {
    let out = run_json(&["shortest-path", "--example"]);

    assert_eq!(out["result"]["target"], "6");
    assert_eq!(out["result"]["outcome"]["distance"].as_f64(), Some(11.0));
}

#[test]
fn cli_reads_edges_and_config_from_files() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let edges = tmp.path().join("edges.txt");
    let config = tmp.path().join("config.json");
    fs::write(&edges, "A B 2\n\nA B 3\n").expect("write edges");
    fs::write(&config, r#"{ "duplicate_edges": "sum" }"#).expect("write config");

    let out = run_json(&[
        "max-flow",
        "--nodes",
        "A, B",
        "--edges",
        edges.to_string_lossy().as_ref(),
        "--config",
        config.to_string_lossy().as_ref(),
    ]);
    assert_eq!(out["result"]["max_flow"].as_f64(), Some(5.0));
}

#[test]
fn cli_reads_edges_from_stdin() {
    let exe = assert_cmd::cargo_bin!("aqueduct");
    let assert = assert_cmd::Command::new(exe)
        .args(["max-flow", "--nodes", "s,a,t", "--edges", "-"])
        .write_stdin("s a 3\na t 2\n")
        .assert()
        .success();

    let out: Value = serde_json::from_slice(&assert.get_output().stdout).expect("stdout is JSON");
    assert_eq!(out["result"]["max_flow"].as_f64(), Some(2.0));
}

#[test]
fn cli_reports_malformed_edge_line() {
    let exe = assert_cmd::cargo_bin!("aqueduct");
    let assert = assert_cmd::Command::new(exe)
        .args(["mst", "--nodes", "A,B"])
        .write_stdin("A B 1\nA B\n")
        .assert()
        .failure()
        .code(1);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("line 2"), "unexpected stderr: {stderr}");
}

#[test]
fn cli_reports_validation_errors() {
    let exe = assert_cmd::cargo_bin!("aqueduct");
    let assert = assert_cmd::Command::new(exe)
        .args(["shortest-path", "--nodes", "A,B", "--target", "Z"])
        .write_stdin("A B 1\n")
        .assert()
        .failure()
        .code(1);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("`Z`"), "unexpected stderr: {stderr}");
}

#[test]
fn cli_usage_errors_exit_with_two() {
    let exe = assert_cmd::cargo_bin!("aqueduct");
    Command::new(&exe).assert().failure().code(2);
    Command::new(&exe)
        .args(["max-flow", "--bogus"])
        .assert()
        .failure()
        .code(2);
    Command::new(&exe)
        .args(["mst", "--nodes"])
        .assert()
        .failure()
        .code(2);
}
