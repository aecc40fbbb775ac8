//! `evaluate` command

use std::io::Write;

use clap::Args;

use super::{arg_opt, arg_value, session, CliContext, LoanArgs};
use crate::error::AgentResult;
use crate::request::{Envelope, EvaluateRequest, Request};

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Gross monthly household income
    #[arg(long)]
    pub income: String,

    #[arg(long)]
    pub cash: String,

    /// CPF Ordinary Account balance
    #[arg(long)]
    pub cpf: String,

    /// BTO flat price to evaluate
    #[arg(long)]
    pub price: String,

    #[command(flatten)]
    pub loan: LoanArgs,

    #[arg(long)]
    pub session: Option<String>,
}

/// Handle the evaluate command
pub fn handle_evaluate_command<W: Write>(
    ctx: &CliContext,
    args: &EvaluateArgs,
    out: &mut W,
) -> AgentResult<()> {
    let request = EvaluateRequest {
        household_income: Some(arg_value(&args.income)),
        cash_savings: Some(arg_value(&args.cash)),
        cpf_savings: Some(arg_value(&args.cpf)),
        annual_rate: arg_opt(&args.loan.rate),
        tenure_years: arg_opt(&args.loan.tenure),
        retain_oa_amount: arg_opt(&args.loan.retain_oa),
        bto_price: Some(arg_value(&args.price)),
    };

    let envelope =
        Envelope::new(Request::Evaluate(request)).with_session(session(&args.session));
    ctx.run(&envelope, out)
}
