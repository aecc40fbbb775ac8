//! Budget models
//!
//! `BudgetInput` is the validated, typed form of a budget request;
//! `BudgetRequest` is what arrives from JSON or the command line before
//! validation.

use serde::{Deserialize, Serialize};

use super::affordability::AffordabilityStatus;
use super::money::Money;
use super::policy::{LoanPolicy, MAX_TENURE_YEARS};
use super::raw::{optional, require, RawValue};
use crate::error::{AgentError, AgentResult};

/// Household finances used to derive a purchasing budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInput {
    /// Gross monthly household income
    pub household_income: Money,
    pub cash_savings: Money,
    /// CPF Ordinary Account balance
    pub cpf_savings: Money,
    pub annual_rate: f64,
    pub tenure_years: u32,
    /// OA balance kept aside instead of going into the purchase
    pub retain_oa_amount: Money,
}

impl BudgetInput {
    /// Create an input using the default rate, tenure and OA retention
    pub fn new(household_income: Money, cash_savings: Money, cpf_savings: Money) -> Self {
        Self::with_policy(household_income, cash_savings, cpf_savings, &LoanPolicy::default())
    }

    /// Create an input whose rate, tenure and OA retention come from a policy
    pub fn with_policy(
        household_income: Money,
        cash_savings: Money,
        cpf_savings: Money,
        policy: &LoanPolicy,
    ) -> Self {
        Self {
            household_income,
            cash_savings,
            cpf_savings,
            annual_rate: policy.annual_rate,
            tenure_years: policy.tenure_years,
            retain_oa_amount: policy.retain_oa_amount,
        }
    }

    pub fn annual_rate(mut self, rate: f64) -> Self {
        self.annual_rate = rate;
        self
    }

    pub fn tenure_years(mut self, years: u32) -> Self {
        self.tenure_years = years;
        self
    }

    pub fn retain_oa_amount(mut self, amount: Money) -> Self {
        self.retain_oa_amount = amount;
        self
    }

    /// Validate the input
    pub fn validate(&self) -> AgentResult<()> {
        for (field, amount) in [
            ("household_income", self.household_income),
            ("cash_savings", self.cash_savings),
            ("cpf_savings", self.cpf_savings),
            ("retain_oa_amount", self.retain_oa_amount),
        ] {
            if amount.is_negative() {
                return Err(AgentError::invalid(field, "must not be negative"));
            }
        }

        if !self.annual_rate.is_finite() || self.annual_rate < 0.0 {
            return Err(AgentError::invalid(
                "annual_rate",
                "must be a non-negative number",
            ));
        }
        if self.annual_rate > 1.0 {
            return Err(AgentError::invalid(
                "annual_rate",
                "expected a fraction such as 0.03, not a percentage",
            ));
        }
        if self.tenure_years > MAX_TENURE_YEARS {
            return Err(AgentError::invalid(
                "tenure_years",
                format!("must be at most {} years", MAX_TENURE_YEARS),
            ));
        }

        Ok(())
    }
}

/// Maximum loan and total purchasing power for one household
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetResult {
    pub max_hdb_loan: Money,
    pub total_budget: Money,
    pub cpf_used_in_budget: Money,
    pub retained_oa: Money,
}

/// Budget plus the verdict for a single flat price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanEvaluation {
    pub max_hdb_loan: Money,
    pub total_budget: Money,
    pub affordability_status: AffordabilityStatus,
    pub shortfall: Money,
}

/// A budget request as received, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_income: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_savings: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf_savings: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_rate: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure_years: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retain_oa_amount: Option<RawValue>,
}

impl BudgetRequest {
    /// Validate every field, filling omitted optional fields from the policy
    pub fn into_input(&self, policy: &LoanPolicy) -> AgentResult<BudgetInput> {
        let household_income =
            require(&self.household_income, "household_income")?.to_money("household_income")?;
        let cash_savings = require(&self.cash_savings, "cash_savings")?.to_money("cash_savings")?;
        let cpf_savings = require(&self.cpf_savings, "cpf_savings")?.to_money("cpf_savings")?;

        let mut input =
            BudgetInput::with_policy(household_income, cash_savings, cpf_savings, policy);

        if let Some(rate) = optional(&self.annual_rate) {
            input.annual_rate = rate.to_rate("annual_rate")?;
        }
        if let Some(tenure) = optional(&self.tenure_years) {
            input.tenure_years = tenure.to_tenure("tenure_years")?;
        }
        if let Some(retain) = optional(&self.retain_oa_amount) {
            input.retain_oa_amount = retain.to_money("retain_oa_amount")?;
        }

        input.validate()?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> BudgetRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_new_uses_defaults() {
        let input = BudgetInput::new(
            Money::from_dollars(9000),
            Money::from_dollars(50_000),
            Money::from_dollars(120_000),
        );
        assert_eq!(input.annual_rate, 0.03);
        assert_eq!(input.tenure_years, 25);
        assert_eq!(input.retain_oa_amount, Money::from_dollars(20_000));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_amounts() {
        let input = BudgetInput::new(
            Money::from_dollars(9000),
            Money::from_dollars(-1),
            Money::zero(),
        );
        let err = input.validate().unwrap_err();
        assert_eq!(err.field(), Some("cash_savings"));
    }

    #[test]
    fn test_validate_rejects_bad_rate() {
        let input = BudgetInput::new(Money::zero(), Money::zero(), Money::zero()).annual_rate(-0.01);
        assert_eq!(input.validate().unwrap_err().field(), Some("annual_rate"));

        let input = BudgetInput::new(Money::zero(), Money::zero(), Money::zero()).annual_rate(f64::NAN);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_request_into_input_with_defaults() {
        let req = request(
            r#"{"household_income": 9000, "cash_savings": "50000", "cpf_savings": 120000}"#,
        );
        let input = req.into_input(&LoanPolicy::default()).unwrap();
        assert_eq!(input.household_income, Money::from_dollars(9000));
        assert_eq!(input.cash_savings, Money::from_dollars(50_000));
        assert_eq!(input.tenure_years, 25);
    }

    #[test]
    fn test_request_overrides() {
        let req = request(
            r#"{"household_income": 9000, "cash_savings": 0, "cpf_savings": 0,
                "annual_rate": 0.026, "tenure_years": 30, "retain_oa_amount": 0}"#,
        );
        let input = req.into_input(&LoanPolicy::default()).unwrap();
        assert_eq!(input.annual_rate, 0.026);
        assert_eq!(input.tenure_years, 30);
        assert!(input.retain_oa_amount.is_zero());
    }

    #[test]
    fn test_request_missing_field() {
        let req = request(r#"{"household_income": 9000, "cash_savings": 0}"#);
        let err = req.into_input(&LoanPolicy::default()).unwrap_err();
        assert_eq!(err.field(), Some("cpf_savings"));
    }

    #[test]
    fn test_request_non_numeric_field() {
        let req = request(
            r#"{"household_income": "nine thousand", "cash_savings": 0, "cpf_savings": 0}"#,
        );
        let err = req.into_input(&LoanPolicy::default()).unwrap_err();
        assert_eq!(err.field(), Some("household_income"));
    }
}
