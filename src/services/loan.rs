//! Loan math
//!
//! Fixed-rate annuity present value, compounded monthly.

use crate::error::{AgentError, AgentResult};
use crate::models::Money;

/// Present value of 1 paid monthly for `tenure_years` at `annual_rate`.
///
/// A zero rate degenerates to the number of payments; a zero tenure to 0.
pub fn annuity_factor(annual_rate: f64, tenure_years: u32) -> f64 {
    let periods = tenure_years * 12;
    if periods == 0 {
        return 0.0;
    }

    let monthly_rate = annual_rate / 12.0;
    if monthly_rate == 0.0 {
        return periods as f64;
    }

    let growth = (1.0 + monthly_rate).powf(periods as f64);
    (growth - 1.0) / (monthly_rate * growth)
}

/// Monthly instalment a household can service
pub fn monthly_instalment(household_income: Money, income_ratio: f64) -> f64 {
    household_income.as_f64() * income_ratio
}

/// Largest loan whose instalment fits the budget, rounded to cents
pub fn max_loan_for_instalment(
    instalment: f64,
    annual_rate: f64,
    tenure_years: u32,
) -> AgentResult<Money> {
    let principal = instalment * annuity_factor(annual_rate, tenure_years);
    Money::from_f64(principal)
        .ok_or_else(|| AgentError::invalid("household_income", "loan amount out of range"))
}
