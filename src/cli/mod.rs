//! CLI command handlers
//!
//! Bridges clap argument parsing with the request layer. Every command that
//! computes something builds a typed request, runs it through the
//! `RequestHandler`, records the response in the audit log and renders it
//! in the selected output format.

pub mod afford;
pub mod audit;
pub mod budget;
pub mod estimates;
pub mod evaluate;
pub mod request;

pub use afford::{handle_afford_command, AffordArgs};
pub use audit::{handle_audit_command, AuditArgs};
pub use budget::{handle_budget_command, BudgetArgs, LoanArgs};
pub use estimates::{handle_estimates_command, EstimatesArgs};
pub use evaluate::{handle_evaluate_command, EvaluateArgs};
pub use request::{handle_request_command, RequestArgs};

use std::io::Write;

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{AgentPaths, Settings};
use crate::display::format_calculation;
use crate::error::{AgentError, AgentResult};
use crate::export::{write_calculation_csv, write_json, write_yaml, OutputFormat};
use crate::models::{LoanPolicy, RawValue, SessionId};
use crate::request::{Calculation, Envelope, RequestHandler, Response};

/// Everything a command needs besides its own arguments
pub struct CliContext {
    pub paths: AgentPaths,
    pub settings: Settings,
    pub format: OutputFormat,
    audit: Option<AuditLogger>,
}

impl CliContext {
    /// `format` overrides the configured default; `audit` can only switch
    /// auditing off, never on against the settings
    pub fn new(
        paths: AgentPaths,
        settings: Settings,
        format: Option<OutputFormat>,
        audit: bool,
    ) -> Self {
        let audit = (audit && settings.audit_enabled).then(|| AuditLogger::new(paths.audit_log()));
        Self {
            format: format.unwrap_or(settings.default_format),
            paths,
            settings,
            audit,
        }
    }

    pub fn policy(&self) -> &LoanPolicy {
        &self.settings.loan_policy
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Append a response to the audit log. A failed write is logged, not fatal.
    pub fn record(&self, response: &Response) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&AuditEntry::from_response(response)) {
                warn!(error = %e, path = %logger.path().display(), "could not write audit entry");
            }
        }
    }

    /// Execute a typed request, audit it and render the result
    pub fn run<W: Write>(&self, envelope: &Envelope, out: &mut W) -> AgentResult<()> {
        let handler = RequestHandler::new(self.policy());
        let calculation = handler.execute(&envelope.request);

        let response = match &calculation {
            Ok(calculation) => Response::success(calculation)?,
            Err(err) => Response::failure(Some(envelope.operation), err),
        }
        .with_session(envelope.session_id.clone());
        self.record(&response);

        self.render(&calculation?, &response, out)
    }

    /// Write a calculation in the selected format
    pub fn render<W: Write>(
        &self,
        calculation: &Calculation,
        response: &Response,
        out: &mut W,
    ) -> AgentResult<()> {
        match self.format {
            OutputFormat::Text => {
                write!(out, "{}", format_calculation(calculation, self.symbol()))?;
                Ok(())
            }
            OutputFormat::Json => write_json(response, out),
            OutputFormat::Yaml => write_yaml(response, out),
            OutputFormat::Csv => write_calculation_csv(calculation, out),
        }
    }
}

/// An amount typed on the command line; commas and `$` are accepted
pub(crate) fn arg_value(raw: &str) -> RawValue {
    RawValue::Text(raw.to_string())
}

pub(crate) fn arg_opt(raw: &Option<String>) -> Option<RawValue> {
    raw.as_deref().map(arg_value)
}

pub(crate) fn session(raw: &Option<String>) -> Option<SessionId> {
    raw.as_ref().map(SessionId::new)
}

/// Read a whole file, or stdin for `-`
pub(crate) fn read_input(path: &str) -> AgentResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
            .map_err(|e| AgentError::Io(format!("Failed to read stdin: {}", e)))?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| AgentError::Io(format!("Failed to read {}: {}", path, e)))
    }
}
