//! Tool dispatch gated by guardrails
//!
//! Every invocation goes through [`gate`] before its handler runs. One unsafe
//! verdict aborts the call and its reason becomes the tool's error result.

pub mod plan;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::engine::GuardrailEngine;
use crate::error::InputError;
use crate::input::ToolInvocation;
use crate::output::{ToolResult, Verdict};

pub use plan::plan_guards;

/// Error type handlers may return
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// The code that actually performs a tool call once it has been admitted
pub trait ToolHandler {
    fn call(&self, invocation: &ToolInvocation) -> Result<Value, HandlerError>;
}

impl<F> ToolHandler for F
where
    F: Fn(&ToolInvocation) -> Result<Value, HandlerError>,
{
    fn call(&self, invocation: &ToolInvocation) -> Result<Value, HandlerError> {
        self(invocation)
    }
}

/// Outcome of gating one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Every applicable check passed
    Admit { checks: usize },

    /// A check failed; later checks were not run
    Deny(Verdict),
}

impl Gate {
    pub fn is_admit(&self) -> bool {
        matches!(self, Gate::Admit { .. })
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, Gate::Deny(_))
    }
}

/// Run every guardrail that applies to `invocation`, stopping at the first
/// unsafe verdict
pub fn gate(engine: &GuardrailEngine, invocation: &ToolInvocation) -> Result<Gate, InputError> {
    let guards = plan_guards(&invocation.arguments)?;

    for guard in &guards {
        let verdict = engine.check(guard);
        if verdict.is_unsafe() {
            warn!(
                tool = %invocation.name,
                check = guard.kind(),
                rule_id = verdict.rule_id().unwrap_or_default(),
                "tool call blocked"
            );
            return Ok(Gate::Deny(verdict));
        }
    }

    info!(tool = %invocation.name, checks = guards.len(), "tool call admitted");
    Ok(Gate::Admit {
        checks: guards.len(),
    })
}

/// Routes admitted invocations to a handler
pub struct Dispatcher<H> {
    engine: GuardrailEngine,
    handler: H,
}

impl<H: ToolHandler> Dispatcher<H> {
    /// Create a dispatcher with the built-in rules
    pub fn new(handler: H) -> Self {
        Self::with_engine(GuardrailEngine::default(), handler)
    }

    /// Create a dispatcher over a specific engine
    pub fn with_engine(engine: GuardrailEngine, handler: H) -> Self {
        Self { engine, handler }
    }

    /// Gate an invocation and, if admitted, run its handler.
    ///
    /// Denials and handler failures are returned as error results. Only a
    /// malformed invocation is an `Err`.
    pub fn dispatch(&self, invocation: &ToolInvocation) -> Result<ToolResult, InputError> {
        match gate(&self.engine, invocation)? {
            Gate::Deny(verdict) => Ok(ToolResult::denied(&verdict)),
            Gate::Admit { .. } => match self.handler.call(invocation) {
                Ok(value) => Ok(ToolResult::success(value)),
                Err(e) => {
                    error!(tool = %invocation.name, error = %e, "tool handler failed");
                    Ok(ToolResult::error(format!(
                        "tool {} failed: {}",
                        invocation.name, e
                    )))
                }
            },
        }
    }

    /// Get the engine
    pub fn engine(&self) -> &GuardrailEngine {
        &self.engine
    }

    /// Get the handler
    pub fn handler(&self) -> &H {
        &self.handler
    }
}
