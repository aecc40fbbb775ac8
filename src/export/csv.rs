//! CSV output
//!
//! Budgets and evaluations are a single row; affordability and estimate
//! results get one row per listing or estimate, failures included.

use std::io::Write;

use crate::error::{AgentError, AgentResult};
use crate::models::{EstimateOutcome, ListingOutcome, Money};
use crate::request::Calculation;

fn amount(money: Money) -> String {
    format!("{:.2}", money.as_f64())
}

fn export_err(e: csv::Error) -> AgentError {
    AgentError::Export(e.to_string())
}

/// Write a calculation as CSV with a header row
pub fn write_calculation_csv<W: Write>(calculation: &Calculation, writer: W) -> AgentResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    match calculation {
        Calculation::Budget { input, result } => {
            wtr.write_record([
                "household_income",
                "cash_savings",
                "cpf_savings",
                "annual_rate",
                "tenure_years",
                "max_hdb_loan",
                "cpf_used_in_budget",
                "retained_oa",
                "total_budget",
            ])
            .map_err(export_err)?;
            wtr.write_record([
                amount(input.household_income),
                amount(input.cash_savings),
                amount(input.cpf_savings),
                input.annual_rate.to_string(),
                input.tenure_years.to_string(),
                amount(result.max_hdb_loan),
                amount(result.cpf_used_in_budget),
                amount(result.retained_oa),
                amount(result.total_budget),
            ])
            .map_err(export_err)?;
        }
        Calculation::Evaluate {
            bto_price, result, ..
        } => {
            wtr.write_record([
                "bto_price",
                "max_hdb_loan",
                "total_budget",
                "affordability_status",
                "shortfall",
            ])
            .map_err(export_err)?;
            wtr.write_record([
                amount(*bto_price),
                amount(result.max_hdb_loan),
                amount(result.total_budget),
                result.affordability_status.to_string(),
                amount(result.shortfall),
            ])
            .map_err(export_err)?;
        }
        Calculation::Affordability { outcomes, .. } => {
            wtr.write_record(["name", "price", "affordability_status", "shortfall", "error"])
                .map_err(export_err)?;
            for outcome in outcomes {
                let row = match outcome {
                    ListingOutcome::Assessed(r) => [
                        r.name.clone(),
                        amount(r.price),
                        r.affordability_status.to_string(),
                        amount(r.shortfall),
                        String::new(),
                    ],
                    ListingOutcome::Invalid(f) => [
                        f.name.clone(),
                        String::new(),
                        "error".to_string(),
                        String::new(),
                        f.error.clone(),
                    ],
                };
                wtr.write_record(&row).map_err(export_err)?;
            }
        }
        Calculation::Estimates { outcomes, .. } => {
            wtr.write_record([
                "id",
                "affordability_status",
                "shortfall",
                "margin_vs_estimate",
                "confidence",
                "error",
            ])
            .map_err(export_err)?;
            for (id, outcome) in outcomes {
                let row = match outcome {
                    EstimateOutcome::Assessed(a) => [
                        id.clone(),
                        a.affordability_status.to_string(),
                        amount(a.shortfall),
                        amount(a.margin_vs_estimate),
                        a.confidence.to_string(),
                        String::new(),
                    ],
                    EstimateOutcome::Failed(f) => [
                        id.clone(),
                        "error".to_string(),
                        String::new(),
                        String::new(),
                        f.confidence.to_string(),
                        f.error.clone(),
                    ],
                };
                wtr.write_record(&row).map_err(export_err)?;
            }
        }
    }

    wtr.flush()
        .map_err(|e| AgentError::Export(format!("Failed to flush CSV output: {}", e)))?;
    Ok(())
}
