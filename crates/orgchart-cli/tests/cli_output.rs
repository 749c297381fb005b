//! End-to-end tests that run the built binary
//!
//! Layout JSON goes to stdout and diagnostics to stderr, so stdout must
//! always parse cleanly.

use std::process::{Command, Output};

fn run_cli(args: &[&str], input: &str) -> Result<Output, Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let input_path = temp_dir.path().join("chart.json");
    std::fs::write(&input_path, input)?;

    let output = Command::new(env!("CARGO_BIN_EXE_orgchart"))
        .args(args)
        .arg("--input")
        .arg(&input_path)
        .env_remove("RUST_LOG")
        .env_remove("ORGCHART_LOG_LEVEL")
        .env_remove("ORGCHART_LOG_FORMAT")
        .output()?;
    Ok(output)
}

const CHART: &str = r#"[
    {"id": "ceo", "level": 1},
    {"id": "cto", "level": 2, "parentId": "ceo", "order": 1},
    {"id": "cfo", "level": 2, "parentId": "ceo", "order": 2},
    {"id": "dev", "level": 3, "parentId": "cto"}
]"#;

#[test]
fn test_layout_prints_json_to_stdout() {
    let output = run_cli(&["layout"], CHART).unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = value["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["ceo", "cto", "cfo", "dev"]);
    assert_eq!(value["connections"].as_array().unwrap().len(), 3);
}

#[test]
fn test_warnings_go_to_stderr() {
    let input = r#"[{"id": "a", "level": 1}, {"id": "b", "level": "x"}]"#;
    let output = run_cli(&["layout", "--compact"], input).unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning:"));
    assert!(stderr.contains("b"));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["warnings"][0]["kind"], "invalidLevel");
}

#[test]
fn test_strict_exits_non_zero() {
    let input = r#"[{"id": "a", "level": 1}, {"id": "b", "level": 2, "parentId": "zz"}]"#;
    let output = run_cli(&["layout", "--strict"], input).unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_empty_input_exits_non_zero() {
    let output = run_cli(&["layout"], "[]").unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Empty input"));
}

#[test]
fn test_validate_json_summary() {
    let output = run_cli(&["validate", "--json"], CHART).unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["valid"], true);
    assert_eq!(value["placedCount"], 4);
    assert_eq!(value["connectionCount"], 3);
}

#[test]
fn test_spacing_flags_change_layout() {
    let output = run_cli(&["layout", "--box-width", "90", "--margin", "5"], CHART).unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["nodes"][0]["width"], 90.0);
    assert_eq!(value["bounds"]["minY"], 0.0);
}

#[test]
fn test_log_level_flag_controls_stderr() {
    let output = run_cli(&["--log-level", "error", "layout", "--compact"], CHART).unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("INFO"), "unexpected info output: {}", stderr);
    assert!(!stderr.contains("Failed to initialize logging"));
}

#[test]
fn test_default_log_level_is_warn() {
    let quiet = run_cli(&["layout"], CHART).unwrap();
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("INFO"));

    let chatty = run_cli(&["--log-level", "info", "layout"], CHART).unwrap();
    let stderr = String::from_utf8_lossy(&chatty.stderr);
    assert!(stderr.contains("INFO"));
    assert!(stderr.contains("Org chart layout completed"));
}
