//! Budget and loan evaluation views

use super::report::{format_header, format_rate, labelled, separator};
use crate::models::{BudgetInput, BudgetResult, LoanEvaluation, Money};

const WIDTH: usize = 44;

fn assumptions(input: &BudgetInput, symbol: &str) -> String {
    format!(
        "  {} over {} years, {} OA retained\n",
        format_rate(input.annual_rate),
        input.tenure_years,
        input.retain_oa_amount.format_with_symbol(symbol)
    )
}

/// Format a budget breakdown
pub fn format_budget(input: &BudgetInput, result: &BudgetResult, symbol: &str) -> String {
    let line = |label: &str, amount: Money| labelled(label, &amount.format_with_symbol(symbol), WIDTH);

    let mut output = String::new();
    output.push_str(&format_header("BTO Budget", WIDTH));
    output.push('\n');
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&line("Cash savings", input.cash_savings));
    output.push('\n');
    output.push_str(&line("CPF used", result.cpf_used_in_budget));
    output.push('\n');
    output.push_str(&line("Maximum HDB loan", result.max_hdb_loan));
    output.push('\n');
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&line("Total budget", result.total_budget));
    output.push('\n');
    output.push('\n');
    output.push_str(&line("CPF OA retained", result.retained_oa));
    output.push('\n');
    output.push_str(&assumptions(input, symbol));
    output
}

/// Format the verdict for one flat price
pub fn format_evaluation(
    input: &BudgetInput,
    bto_price: Money,
    result: &LoanEvaluation,
    symbol: &str,
) -> String {
    let line = |label: &str, amount: Money| labelled(label, &amount.format_with_symbol(symbol), WIDTH);

    let mut output = String::new();
    output.push_str(&format_header("BTO Evaluation", WIDTH));
    output.push('\n');
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&line("Maximum HDB loan", result.max_hdb_loan));
    output.push('\n');
    output.push_str(&line("Total budget", result.total_budget));
    output.push('\n');
    output.push_str(&line("Flat price", bto_price));
    output.push('\n');
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&labelled(
        "Status",
        &result.affordability_status.to_string(),
        WIDTH,
    ));
    output.push('\n');
    if !result.shortfall.is_zero() {
        output.push_str(&line("Shortfall", result.shortfall));
        output.push('\n');
    }
    output.push_str(&assumptions(input, symbol));
    output
}
