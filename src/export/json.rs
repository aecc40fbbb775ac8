//! JSON output

use std::io::Write;

use serde::Serialize;

use crate::error::{AgentError, AgentResult};

/// Write any serializable value as pretty JSON followed by a newline
pub fn write_json<T: Serialize, W: Write>(value: &T, writer: &mut W) -> AgentResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)
        .map_err(|e| AgentError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| AgentError::Export(e.to_string()))?;
    Ok(())
}
