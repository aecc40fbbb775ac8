//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{RequestId, SessionId};
use crate::request::{Operation, Response};

/// A single audited request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the request was answered (UTC)
    pub timestamp: DateTime<Utc>,

    pub request_id: RequestId,

    /// Missing when the request was too malformed to route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,

    pub ok: bool,

    /// Sanitised inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    /// Record a response envelope
    pub fn from_response(response: &Response) -> Self {
        Self {
            timestamp: Utc::now(),
            request_id: RequestId::new(),
            operation: response.operation,
            session_id: response.session_id.clone(),
            ok: response.ok,
            input: response.input.clone(),
            calculation: response.calculation.clone(),
            error: response.error.clone(),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let operation = self
            .operation
            .map(|op| op.as_str().to_uppercase())
            .unwrap_or_else(|| "UNKNOWN".to_string());

        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.request_id,
            operation,
            if self.ok { "ok" } else { "failed" }
        );

        if let Some(session) = &self.session_id {
            output.push_str(&format!(" (session {})", session));
        }

        if let Some(error) = &self.error {
            output.push_str(&format!("\n  Error: {}", error));
        }

        output
    }
}
