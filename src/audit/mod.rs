//! Audit logging for AgentBTO
//!
//! Every request answered by the CLI is recorded in an append-only audit
//! log: one JSON object per line with the operation, the sanitised inputs
//! and either the calculation or the error.
//!
//! # Example
//!
//! ```rust,ignore
//! use agentbto::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::from_response(&response))?;
//! ```

mod entry;
mod logger;

pub use entry::AuditEntry;
pub use logger::AuditLogger;
