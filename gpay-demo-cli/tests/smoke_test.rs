//! Smoke tests for gpay-demo-cli
//!
//! These tests run the built `gpay-demo` binary without network access.

use std::process::{Command, Output};

fn gpay_demo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gpay-demo"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute gpay-demo")
}

/// Test that the CLI can show help
#[test]
fn test_cli_help() {
    let output = gpay_demo(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    for command in ["url", "bridge", "simulate"] {
        assert!(stdout.contains(command), "Help should mention '{command}'");
    }
}

#[test]
fn test_cli_url() {
    let output = gpay_demo(&[
        "url",
        "--env",
        "staging",
        "--amount",
        "100",
        "--requester",
        "u1",
        "--request-id",
        "r1",
        "--request-time",
        "t1",
        "--app-scheme",
        "myshop",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains(
        "http://192.168.0.111:8080/banking/gpay_payment_page.jsp?amount=100.0&requester_username=u1&request_id=r1&request_time=t1&app_name=myshop&platform=ios"
    ));
}

#[test]
fn test_cli_url_invalid_base_fails() {
    let output = gpay_demo(&[
        "url",
        "--amount",
        "1",
        "--requester",
        "u1",
        "--request-id",
        "r1",
        "--request-time",
        "t1",
        "--base-url",
        "not a url",
    ]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_bridge() {
    let output = gpay_demo(&[
        "bridge",
        r#"{"event":"makePayment","amount":100,"requestId":"r1","requestTimestamp":"t1","requesterUsername":"u1","appName":"a1"}"#,
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains(
        "lggpay://pay-request?amount=100&request_id=r1&request_time=t1&requester_username=u1&app_name=a1"
    ));
}

#[test]
fn test_cli_simulate_sample_script() {
    let script = concat!(env!("CARGO_MANIFEST_DIR"), "/scripts/session.json");
    let output = gpay_demo(&["simulate", script]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("open_external_url lggpay://pay-request?amount=250.75"));
    assert!(stdout.contains("on_view_closed INV-2025-0042"));
}

#[test]
fn test_cli_simulate_missing_script_fails() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.json");
    let output = gpay_demo(&["simulate", missing.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_simulate_custom_script() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    std::fs::write(
        &path,
        r#"{"config":{"base_url_override":"not a url"},
            "request":{"amount":1,"requester_username":"u","request_id":"r","request_time":"t"},
            "steps":["present","close"]}"#,
    )
    .unwrap();

    let output = gpay_demo(&["simulate", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("show_placeholder Invalid URL"));
    assert!(!stdout.contains("load_url"));
}
