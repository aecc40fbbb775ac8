//! Loan policy
//!
//! The serviceable instalment is a configurable share of monthly household
//! income. The remaining fields supply defaults for requests that omit them.

use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::{AgentError, AgentResult};

/// Longest tenure accepted, in years
pub const MAX_TENURE_YEARS: u32 = 100;

/// Parameters that turn income into a maximum loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPolicy {
    /// Fraction of monthly household income available for the mortgage instalment
    #[serde(default = "default_income_ratio")]
    pub income_ratio: f64,

    /// Annual interest rate used when a request does not give one
    #[serde(default = "default_annual_rate")]
    pub annual_rate: f64,

    /// Loan tenure used when a request does not give one
    #[serde(default = "default_tenure_years")]
    pub tenure_years: u32,

    /// CPF OA balance kept aside when a request does not say otherwise
    #[serde(default = "default_retain_oa_amount")]
    pub retain_oa_amount: Money,
}

fn default_income_ratio() -> f64 {
    0.30
}

fn default_annual_rate() -> f64 {
    0.03
}

fn default_tenure_years() -> u32 {
    25
}

fn default_retain_oa_amount() -> Money {
    Money::from_dollars(20_000)
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            income_ratio: default_income_ratio(),
            annual_rate: default_annual_rate(),
            tenure_years: default_tenure_years(),
            retain_oa_amount: default_retain_oa_amount(),
        }
    }
}

impl LoanPolicy {
    /// Check that the policy can be used for calculations
    pub fn validate(&self) -> AgentResult<()> {
        if !self.income_ratio.is_finite() || !(0.0..=1.0).contains(&self.income_ratio) {
            return Err(AgentError::Config(format!(
                "income_ratio must be between 0 and 1, got {}",
                self.income_ratio
            )));
        }
        if !self.annual_rate.is_finite() || !(0.0..=1.0).contains(&self.annual_rate) {
            return Err(AgentError::Config(format!(
                "annual_rate must be between 0 and 1, got {}",
                self.annual_rate
            )));
        }
        if self.tenure_years > MAX_TENURE_YEARS {
            return Err(AgentError::Config(format!(
                "tenure_years must be at most {}, got {}",
                MAX_TENURE_YEARS, self.tenure_years
            )));
        }
        if self.retain_oa_amount.is_negative() {
            return Err(AgentError::Config(
                "retain_oa_amount must not be negative".into(),
            ));
        }
        Ok(())
    }
}
