//! Runs the built binary against a shared object that exports none of the SDK symbols.
#![cfg(all(target_os = "linux", target_env = "gnu"))]

use std::process::Command;

fn run_probe(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mdk-probe"))
        .args(args)
        .env("RUST_LOG", "debug")
        .output()
        .expect("mdk-probe runs")
}

#[test]
fn json_report_keeps_logs_off_stdout() {
    let output = run_probe(&["--library", "libc.so.6", "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is only the report");
    assert_eq!(report["complete"], false);
    assert_eq!(report["path"], "libc.so.6");
    assert_eq!(report["missing"].as_array().map(Vec::len), Some(19));
    assert_eq!(report["groups"].as_array().map(Vec::len), Some(4));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to resolve symbol"));
}

#[test]
fn unopenable_library_exits_with_two() {
    let output = run_probe(&["--library", "/nonexistent/libmdk.so.0", "--json"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
