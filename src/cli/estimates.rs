//! `estimates` command

use std::io::Write;
use std::path::Path;

use clap::Args;

use super::{arg_value, read_input, session, CliContext};
use crate::error::AgentResult;
use crate::request::{Envelope, EstimatesRequest, Request};
use crate::services::import::{load_estimates, parse_estimates_json};

#[derive(Args, Debug, Clone)]
pub struct EstimatesArgs {
    /// Total budget to compare against
    #[arg(long)]
    pub budget: String,

    /// JSON map of id -> estimate, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub file: String,

    #[arg(long)]
    pub session: Option<String>,
}

/// Handle the estimates command
pub fn handle_estimates_command<W: Write>(
    ctx: &CliContext,
    args: &EstimatesArgs,
    out: &mut W,
) -> AgentResult<()> {
    let estimates = if args.file == "-" {
        parse_estimates_json(&read_input("-")?)?
    } else {
        load_estimates(Path::new(&args.file))?
    };

    let request = EstimatesRequest {
        total_budget: Some(arg_value(&args.budget)),
        estimates,
    };
    let envelope =
        Envelope::new(Request::Estimates(request)).with_session(session(&args.session));
    ctx.run(&envelope, out)
}
