//! `request` command: one JSON request in, one JSON envelope out

use std::io::Write;

use clap::Args;
use tracing::info;

use super::{read_input, CliContext};
use crate::error::AgentResult;
use crate::export::{write_json, write_yaml, OutputFormat};
use crate::request::{RequestHandler, Response};

#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Request file, or `-` for stdin
    #[arg(default_value = "-")]
    pub file: String,
}

/// Answer a JSON request. Invalid requests still produce an envelope, with
/// `ok: false`; only I/O problems are returned as errors.
pub fn handle_request_command<W: Write>(
    ctx: &CliContext,
    args: &RequestArgs,
    out: &mut W,
) -> AgentResult<Response> {
    let text = read_input(&args.file)?;
    let response = RequestHandler::new(ctx.policy()).handle_json(&text);
    info!(ok = response.ok, operation = ?response.operation, "request answered");
    ctx.record(&response);

    match ctx.format {
        OutputFormat::Yaml => write_yaml(&response, out)?,
        _ => write_json(&response, out)?,
    }
    Ok(response)
}
