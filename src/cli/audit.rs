//! `audit` command

use std::io::Write;

use clap::Args;

use super::CliContext;
use crate::audit::AuditLogger;
use crate::error::AgentResult;
use crate::export::{write_json, write_yaml, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// Number of most recent entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub count: usize,
}

/// Show recent audit entries. Reads the log even when auditing is off.
pub fn handle_audit_command<W: Write>(
    ctx: &CliContext,
    args: &AuditArgs,
    out: &mut W,
) -> AgentResult<()> {
    let logger = AuditLogger::new(ctx.paths.audit_log());
    let entries = logger.read_recent(args.count)?;

    match ctx.format {
        OutputFormat::Json => write_json(&entries, out),
        OutputFormat::Yaml => write_yaml(&entries, out),
        OutputFormat::Text | OutputFormat::Csv => {
            if entries.is_empty() {
                writeln!(out, "No audit entries found at {}", logger.path().display())?;
                return Ok(());
            }
            for entry in &entries {
                writeln!(out, "{}", entry.format_human_readable())?;
            }
            writeln!(
                out,
                "\nShowing {} of {} entries",
                entries.len(),
                logger.entry_count()?
            )?;
            Ok(())
        }
    }
}
