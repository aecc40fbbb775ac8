//! `budget` command

use std::io::Write;

use clap::Args;

use super::{arg_opt, arg_value, session, CliContext};
use crate::error::AgentResult;
use crate::models::BudgetRequest;
use crate::request::{Envelope, Request};

/// Loan terms that override the configured policy
#[derive(Args, Debug, Clone, Default)]
pub struct LoanArgs {
    /// Annual interest rate as a fraction (e.g. 0.026)
    #[arg(long)]
    pub rate: Option<String>,

    /// Loan tenure in years
    #[arg(long)]
    pub tenure: Option<String>,

    /// CPF OA amount to keep aside
    #[arg(long = "retain-oa")]
    pub retain_oa: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct BudgetArgs {
    /// Gross monthly household income
    #[arg(long)]
    pub income: String,

    /// Cash savings available for the purchase
    #[arg(long)]
    pub cash: String,

    /// CPF Ordinary Account balance
    #[arg(long)]
    pub cpf: String,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Session identifier to carry into the output and audit log
    #[arg(long)]
    pub session: Option<String>,
}

impl BudgetArgs {
    pub fn to_request(&self) -> BudgetRequest {
        BudgetRequest {
            household_income: Some(arg_value(&self.income)),
            cash_savings: Some(arg_value(&self.cash)),
            cpf_savings: Some(arg_value(&self.cpf)),
            annual_rate: arg_opt(&self.loan.rate),
            tenure_years: arg_opt(&self.loan.tenure),
            retain_oa_amount: arg_opt(&self.loan.retain_oa),
        }
    }
}

/// Handle the budget command
pub fn handle_budget_command<W: Write>(
    ctx: &CliContext,
    args: &BudgetArgs,
    out: &mut W,
) -> AgentResult<()> {
    let envelope =
        Envelope::new(Request::Budget(args.to_request())).with_session(session(&args.session));
    ctx.run(&envelope, out)
}
