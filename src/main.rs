//! hosting-guardrails - Security guardrails for site-generation and hosting tools
//!
//! Vets one request before a tool dispatcher runs the handler.
//!
//! # Usage
//!
//! ```bash
//! # Gate a tool call (prints {} when admitted, an error result when denied)
//! echo '{"name":"php_security_check","arguments":{"filePath":"../etc"}}' | hosting-guardrails
//!
//! # Run a single check (prints the verdict)
//! echo '{"check":"sql","statement":"DROP TABLE users"}' | hosting-guardrails
//! ```

use std::env;
use std::io::{self, Read, Write};
use std::process;

use tracing_subscriber::EnvFilter;

use hosting_guardrails::{
    audit::{AuditEntry, AuditLogger},
    config::Config,
    dispatch::{gate, Gate},
    engine::GuardrailEngine,
    error::InputError,
    input::{Request, ToolInvocation},
    output::ToolResult,
};

/// Exit status for input that broke the contract
const EXIT_INPUT_ERROR: i32 = 2;

/// Print version information
fn print_version() {
    println!("hosting-guardrails {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"hosting-guardrails - Security guardrails for site-generation and hosting tools

USAGE:
    hosting-guardrails [OPTIONS] < request.json

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -c, --config PATH       Path to config file

REQUESTS (one JSON object on stdin):
    Tool call:    {{"name": "shop_add_product", "arguments": {{"shopPath": "shops/demo"}}}}
    Single check: {{"check": "path", "path": "assets/app.js"}}
                  {{"check": "sql", "statement": "..."}}
                  {{"check": "code", "source": "..."}}
                  {{"check": "upload", "sizeBytes": 1024, "mimeType": "image/png"}}
                  {{"check": "credential", "username": "...", "password": "..."}}

EXIT STATUS:
    0   request evaluated (admitted or denied)
    2   malformed request

ENVIRONMENT:
    HOSTING_GUARDRAILS_LOG  Log filter for stderr diagnostics (default: warn)
"#
    );
}

/// Parse command line arguments
struct Args {
    help: bool,
    version: bool,
    config_path: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            config_path: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                arg if arg.starts_with("--config=") => {
                    let path = arg.trim_start_matches("--config=");
                    result.config_path = Some(path.to_string());
                }
                _ => {}
            }
            i += 1;
        }

        result
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HOSTING_GUARDRAILS_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn emit(json: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", json);
    let _ = handle.flush();
}

fn log_entry(logger: &mut AuditLogger, entry: &AuditEntry) {
    if let Err(e) = logger.log(entry) {
        tracing::warn!(error = %e, "failed to write audit log");
    }
}

fn reject_input(
    logger: &mut AuditLogger,
    invocation: Option<&ToolInvocation>,
    error: InputError,
) -> ! {
    tracing::error!(error = %error, "malformed request");
    log_entry(logger, &AuditEntry::for_input_error(invocation, &error));
    emit(&ToolResult::input_error(&error).to_json());
    process::exit(EXIT_INPUT_ERROR);
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if args.help {
        print_help();
        return;
    }

    if args.version {
        print_version();
        return;
    }

    let config = match args.config_path {
        Some(ref path) => Config::load_from(std::path::Path::new(path)).unwrap_or_else(|e| {
            tracing::warn!(path = %path, error = %e, "using default config");
            Config::default()
        }),
        None => Config::load(),
    };

    let engine = GuardrailEngine::builtin();
    let mut logger = AuditLogger::new(config.audit_path().as_deref());

    // Raw bytes so that invalid UTF-8 is rejected by the JSON parser
    let mut input = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut input) {
        reject_input(&mut logger, None, InputError::Io(e));
    }

    // Nothing to check
    if input.iter().all(u8::is_ascii_whitespace) {
        emit("{}");
        return;
    }

    let request = match Request::from_slice(&input) {
        Ok(request) => request,
        Err(e) => reject_input(&mut logger, None, e),
    };

    match request {
        Request::Guard(input) => {
            let verdict = engine.check(&input);
            log_entry(&mut logger, &AuditEntry::for_verdict(&input, &verdict));
            emit(&verdict.to_json());
        }
        Request::Invocation(invocation) => match gate(engine, &invocation) {
            Ok(outcome) => {
                log_entry(&mut logger, &AuditEntry::for_gate(&invocation, &outcome));
                match outcome {
                    Gate::Admit { .. } => emit("{}"),
                    Gate::Deny(verdict) => emit(&ToolResult::denied(&verdict).to_json()),
                }
            }
            Err(e) => reject_input(&mut logger, Some(&invocation), e),
        },
    }
}
