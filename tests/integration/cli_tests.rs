//! Integration tests for the hosting-guardrails binary

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

/// Config with the audit log switched off, so nothing lands in $HOME
fn quiet_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, "[general]\naudit_log = false\n").unwrap();
    path
}

/// Feed `input` to the binary, returning its exit status and stdout
fn run_with_config(config: &Path, input: &[u8]) -> (Option<i32>, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_hosting-guardrails"))
        .arg("--config")
        .arg(config)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    child.stdin.take().unwrap().write_all(input).unwrap();
    let output = child.wait_with_output().unwrap();
    (
        output.status.code(),
        String::from_utf8(output.stdout).unwrap(),
    )
}

fn run(input: &[u8]) -> (Option<i32>, Value) {
    let dir = TempDir::new().unwrap();
    let (code, stdout) = run_with_config(&quiet_config(dir.path()), input);
    let json = serde_json::from_str(stdout.trim()).unwrap();
    (code, json)
}

fn result_text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap_or_default()
}

// ============================================================================
// Tool calls
// ============================================================================

#[test]
fn test_admitted_call_prints_empty_object() {
    let (code, json) =
        run(br#"{"name":"php_security_check","arguments":{"filePath":"public/index.php"}}"#);
    assert_eq!(code, Some(0));
    assert_eq!(json, serde_json::json!({}));
}

#[test]
fn test_blocked_call_prints_denial() {
    let (code, json) =
        run(br#"{"name":"php_security_check","arguments":{"filePath":"../../etc/passwd"}}"#);
    assert_eq!(code, Some(0));
    assert_eq!(json["isError"], true);
    assert!(result_text(&json).starts_with("[guardrails:path-traversal] Blocked:"));
}

#[test]
fn test_empty_stdin_is_admitted() {
    let inputs: [&[u8]; 2] = [b"", b"  \n\t"];
    for input in inputs {
        let (code, json) = run(input);
        assert_eq!(code, Some(0));
        assert_eq!(json, serde_json::json!({}));
    }
}

// ============================================================================
// Direct checks
// ============================================================================

#[test]
fn test_check_request_prints_verdict() {
    let (code, json) = run(br#"{"check":"sql","statement":"DROP TABLE users"}"#);
    assert_eq!(code, Some(0));
    assert_eq!(json["safe"], false);
    assert_eq!(json["ruleId"], "sql-drop-table");

    let (code, json) = run(br#"{"check":"path","path":"assets/app.js"}"#);
    assert_eq!(code, Some(0));
    assert_eq!(json, serde_json::json!({"safe": true}));
}

// ============================================================================
// Malformed input fails closed
// ============================================================================

#[test]
fn test_malformed_input_exits_with_input_error() {
    let inputs: [&[u8]; 4] = [
        b"{not json",
        br#"{"name":"php_security_check","arguments":{"filePath":7}}"#,
        br#"{"name":"hostinger_database_create","arguments":{"dbUser":"shop"}}"#,
        br#"{"check":"upload","sizeBytes":-1,"mimeType":"image/png"}"#,
    ];
    for input in inputs {
        let (code, json) = run(input);
        assert_eq!(code, Some(2), "{}", String::from_utf8_lossy(input));
        assert_eq!(json["isError"], true);
        assert!(result_text(&json).contains("input-error"));
    }
}

#[test]
fn test_invalid_utf8_is_rejected_not_admitted() {
    let mut input =
        br#"{"name":"php_security_check","arguments":{"filePath":"../../etc/passwd"#.to_vec();
    input.push(0xFF);
    input.extend_from_slice(br#""}}"#);

    let (code, json) = run(&input);
    assert_eq!(code, Some(2));
    assert_eq!(json["isError"], true);
    assert!(result_text(&json).contains("input-error"));
}

// ============================================================================
// Audit log
// ============================================================================

#[test]
fn test_decisions_are_audited() {
    let dir = TempDir::new().unwrap();
    let audit_path = dir.path().join("audit.jsonl");
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!(
            "[general]\naudit_log = true\naudit_path = '{}'\n",
            audit_path.display()
        ),
    )
    .unwrap();

    run_with_config(
        &config,
        br#"{"name":"db_query","arguments":{"query":"TRUNCATE TABLE orders"}}"#,
    );
    run_with_config(&config, b"{not json");

    let log = std::fs::read_to_string(&audit_path).unwrap();
    let entries: Vec<Value> = log
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["level"], "BLOCKED");
    assert_eq!(entries[0]["rule_id"], "sql-truncate-table");
    assert_eq!(entries[1]["level"], "ERROR");
}
