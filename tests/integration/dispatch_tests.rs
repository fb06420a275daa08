//! Integration tests for guardrail-gated tool dispatch

use std::sync::atomic::{AtomicUsize, Ordering};

use hosting_guardrails::dispatch::HandlerError;
use hosting_guardrails::{
    gate, Dispatcher, Gate, GuardrailEngine, InputError, ToolHandler, ToolInvocation, ToolResult,
};
use serde_json::{json, Value};

/// Handler that counts how often it runs
#[derive(Default)]
struct CountingHandler {
    calls: AtomicUsize,
}

impl ToolHandler for CountingHandler {
    fn call(&self, invocation: &ToolInvocation) -> Result<Value, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({"status": "success", "tool": invocation.name}))
    }
}

impl CountingHandler {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn invocation(json: &str) -> ToolInvocation {
    ToolInvocation::from_json(json).unwrap()
}

fn dispatcher() -> Dispatcher<CountingHandler> {
    Dispatcher::new(CountingHandler::default())
}

// ============================================================================
// Composition: deny iff some check is unsafe
// ============================================================================

#[test]
fn test_site_creation_admitted() {
    let inv = invocation(r#"{"name":"php_create_site","arguments":{"siteName":"demo","template":"blog"}}"#);
    let outcome = gate(GuardrailEngine::builtin(), &inv).unwrap();
    assert_eq!(outcome, Gate::Admit { checks: 0 });

    let dispatcher = dispatcher();
    let result = dispatcher.dispatch(&inv).unwrap();
    assert!(!result.is_error);
    assert!(result.text().contains("php_create_site"));
    assert_eq!(dispatcher.handler().calls(), 1);
}

#[test]
fn test_handler_runs_only_when_all_checks_pass() {
    let cases = [
        (r#"{"name":"php_optimize","arguments":{"sitePath":"sites/demo"}}"#, true),
        (r#"{"name":"php_optimize","arguments":{"sitePath":"../demo"}}"#, false),
        (
            r#"{"name":"shop_add_product","arguments":{"shopPath":"shops/a","productName":"Mug","productPrice":9.5,"productImages":["img/a.png","img/b.exe"]}}"#,
            false,
        ),
        (
            r#"{"name":"shop_add_product","arguments":{"shopPath":"shops/a","productName":"Mug","productPrice":9.5,"productImages":["img/a.png"]}}"#,
            true,
        ),
        (
            r#"{"name":"hostinger_database_create","arguments":{"dbName":"shop","dbUser":"shop_app","dbPassword":"Xk9#mP2$vL","hostUrl":"https://h","accessToken":"t"}}"#,
            true,
        ),
        (
            r#"{"name":"hostinger_database_create","arguments":{"dbName":"shop","dbUser":"admin","dbPassword":"Xk9#mP2$vL","hostUrl":"https://h","accessToken":"t"}}"#,
            false,
        ),
        (
            r#"{"name":"db_query","arguments":{"query":"TRUNCATE TABLE orders"}}"#,
            false,
        ),
        (
            r#"{"name":"file_upload","arguments":{"path":"uploads/logo.png","size":2048,"mimetype":"image/png"}}"#,
            true,
        ),
        (
            r#"{"name":"file_upload","arguments":{"path":"uploads/setup.png","size":2048,"mimetype":"application/x-msdownload"}}"#,
            false,
        ),
        (
            r#"{"name":"php_write","arguments":{"filePath":"index.php","code":"<?php system($_GET['c']); ?>"}}"#,
            false,
        ),
    ];

    for (json, should_run) in cases {
        let dispatcher = dispatcher();
        let result = dispatcher.dispatch(&invocation(json)).unwrap();

        assert_eq!(result.is_error, !should_run, "{}", json);
        assert_eq!(
            dispatcher.handler().calls(),
            usize::from(should_run),
            "{}",
            json
        );
    }
}

#[test]
fn test_denial_surfaces_reason_and_suggestion() {
    let dispatcher = dispatcher();
    let inv = invocation(
        r#"{"name":"hostinger_database_create","arguments":{"dbUser":"shop","dbPassword":"short"}}"#,
    );
    let result = dispatcher.dispatch(&inv).unwrap();

    assert!(result.is_error);
    assert!(result.text().contains("database password is too short"));
    assert!(result.text().contains("Suggestion:"));
    assert_eq!(dispatcher.handler().calls(), 0);
}

#[test]
fn test_first_failing_check_is_reported() {
    let inv = invocation(
        r#"{"name":"x","arguments":{"filePath":"run.sh","query":"DROP DATABASE shop"}}"#,
    );
    match gate(GuardrailEngine::builtin(), &inv).unwrap() {
        Gate::Deny(verdict) => assert_eq!(verdict.rule_id(), Some("path-denied-extension")),
        other => panic!("Expected deny, got {:?}", other),
    }
}

// ============================================================================
// Malformed input is a fault, not a verdict
// ============================================================================

#[test]
fn test_malformed_arguments_are_errors() {
    let dispatcher = dispatcher();

    for json in [
        r#"{"name":"php_security_check","arguments":{"filePath":7}}"#,
        r#"{"name":"php_security_check","arguments":"index.php"}"#,
        r#"{"name":"hostinger_database_create","arguments":{"dbUser":"shop"}}"#,
        r#"{"name":"upload","arguments":{"size":"big","mimetype":"image/png"}}"#,
    ] {
        assert!(dispatcher.dispatch(&invocation(json)).is_err(), "{}", json);
    }
    assert_eq!(dispatcher.handler().calls(), 0);
}

#[test]
fn test_input_error_result_is_distinguishable() {
    let inv = invocation(r#"{"name":"php_security_check","arguments":{"filePath":7}}"#);
    let error = gate(GuardrailEngine::builtin(), &inv).unwrap_err();
    assert!(matches!(error, InputError::WrongType { .. }));

    let result = ToolResult::input_error(&error);
    assert!(result.is_error);
    assert!(result.text().contains("input-error"));
    assert!(!result.text().contains("Blocked"));
}
