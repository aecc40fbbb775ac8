//! Budget calculator
//!
//! Turns household finances into a maximum HDB loan and a total purchasing
//! budget: cash, plus CPF OA above the retained amount, plus the loan.

use tracing::debug;

use crate::error::{AgentError, AgentResult};
use crate::models::{BudgetInput, BudgetResult, LoanEvaluation, LoanPolicy, Money};
use crate::services::affordability::assess_price;
use crate::services::loan::{max_loan_for_instalment, monthly_instalment};

/// Budget calculations under a loan policy
pub struct BudgetCalculator<'a> {
    policy: &'a LoanPolicy,
}

impl<'a> BudgetCalculator<'a> {
    /// Create a new calculator
    pub fn new(policy: &'a LoanPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &LoanPolicy {
        self.policy
    }

    /// Maximum loan serviceable from a monthly household income
    pub fn max_hdb_loan(
        &self,
        household_income: Money,
        annual_rate: f64,
        tenure_years: u32,
    ) -> AgentResult<Money> {
        self.policy.validate()?;
        let instalment = monthly_instalment(household_income, self.policy.income_ratio);
        max_loan_for_instalment(instalment, annual_rate, tenure_years)
    }

    /// Compute the maximum loan and total budget
    pub fn compute(&self, input: &BudgetInput) -> AgentResult<BudgetResult> {
        input.validate()?;

        let max_hdb_loan =
            self.max_hdb_loan(input.household_income, input.annual_rate, input.tenure_years)?;
        let (cpf_used_in_budget, retained_oa) =
            split_cpf(input.cpf_savings, input.retain_oa_amount);
        let total_budget = input
            .cash_savings
            .checked_add(cpf_used_in_budget)
            .and_then(|sum| sum.checked_add(max_hdb_loan))
            .ok_or_else(|| AgentError::invalid("total_budget", "amount out of range"))?;

        debug!(
            max_hdb_loan = max_hdb_loan.cents(),
            cpf_used = cpf_used_in_budget.cents(),
            total_budget = total_budget.cents(),
            "computed budget"
        );

        Ok(BudgetResult {
            max_hdb_loan,
            total_budget,
            cpf_used_in_budget,
            retained_oa,
        })
    }

    /// Compute the budget and judge a single flat price against it
    pub fn evaluate(&self, input: &BudgetInput, bto_price: Money) -> AgentResult<LoanEvaluation> {
        let budget = self.compute(input)?;
        let verdict = assess_price(budget.total_budget, "bto_price", bto_price);

        Ok(LoanEvaluation {
            max_hdb_loan: budget.max_hdb_loan,
            total_budget: budget.total_budget,
            affordability_status: verdict.affordability_status,
            shortfall: verdict.shortfall,
        })
    }
}

/// Split a CPF OA balance into the part used for the purchase and the part retained
pub fn split_cpf(cpf_savings: Money, retain_oa_amount: Money) -> (Money, Money) {
    let retained = retain_oa_amount.min(cpf_savings).max(Money::zero());
    let used = cpf_savings.excess_over(retain_oa_amount);
    (used, retained)
}

/// Compute a budget under the default loan policy
pub fn compute_budget(input: &BudgetInput) -> AgentResult<BudgetResult> {
    let policy = LoanPolicy::default();
    BudgetCalculator::new(&policy).compute(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AffordabilityStatus;
    use crate::services::loan::annuity_factor;

    fn household(income: i64, cash: i64, cpf: i64) -> BudgetInput {
        BudgetInput::new(
            Money::from_dollars(income),
            Money::from_dollars(cash),
            Money::from_dollars(cpf),
        )
    }

    #[test]
    fn test_reference_household() {
        let result = compute_budget(&household(9000, 50_000, 120_000)).unwrap();

        let expected_loan = Money::from_f64(2700.0 * annuity_factor(0.03, 25)).unwrap();
        assert_eq!(result.max_hdb_loan, expected_loan);
        assert_eq!(result.cpf_used_in_budget, Money::from_dollars(100_000));
        assert_eq!(result.retained_oa, Money::from_dollars(20_000));
        assert_eq!(
            result.total_budget,
            Money::from_dollars(150_000) + expected_loan
        );
        // 2700 x 210.88 is a little under 570k
        assert!(result.max_hdb_loan > Money::from_dollars(569_000));
        assert!(result.max_hdb_loan < Money::from_dollars(570_000));
    }

    #[test]
    fn test_total_is_exact_sum() {
        for (income, cash, cpf) in [(0, 0, 0), (4321, 12_345, 6789), (15_000, 1, 500_000)] {
            let input = household(income, cash, cpf);
            let result = compute_budget(&input).unwrap();
            assert_eq!(
                result.total_budget,
                input.cash_savings + result.cpf_used_in_budget + result.max_hdb_loan
            );
        }
    }

    #[test]
    fn test_cpf_below_retention_is_not_used() {
        for cpf in [0, 5_000, 20_000] {
            let result = compute_budget(&household(6000, 10_000, cpf)).unwrap();
            assert!(result.cpf_used_in_budget.is_zero());
            assert_eq!(result.retained_oa, Money::from_dollars(cpf));
        }
    }

    #[test]
    fn test_zero_income_gives_zero_loan() {
        let result = compute_budget(&household(0, 30_000, 50_000)).unwrap();
        assert!(result.max_hdb_loan.is_zero());
        assert_eq!(result.total_budget, Money::from_dollars(60_000));
    }

    #[test]
    fn test_negative_input_is_rejected() {
        let input = household(-1, 0, 0);
        let err = compute_budget(&input).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.field(), Some("household_income"));
    }

    #[test]
    fn test_total_beyond_exact_range_is_rejected() {
        let savings = Money::from_dollars(60_000_000_000_000);
        let input = BudgetInput::new(Money::zero(), savings, savings).retain_oa_amount(Money::zero());
        let err = compute_budget(&input).unwrap_err();
        assert_eq!(err, AgentError::invalid("total_budget", "amount out of range"));
    }

    #[test]
    fn test_custom_retention_and_tenure() {
        let input = household(9000, 0, 120_000)
            .retain_oa_amount(Money::zero())
            .tenure_years(30);
        let result = compute_budget(&input).unwrap();
        assert_eq!(result.cpf_used_in_budget, Money::from_dollars(120_000));
        assert!(result.retained_oa.is_zero());

        let shorter = compute_budget(&household(9000, 0, 120_000)).unwrap();
        assert!(result.max_hdb_loan > shorter.max_hdb_loan);
    }

    #[test]
    fn test_income_ratio_policy() {
        let policy = LoanPolicy {
            income_ratio: 0.15,
            ..LoanPolicy::default()
        };
        let half = BudgetCalculator::new(&policy)
            .max_hdb_loan(Money::from_dollars(9000), 0.03, 25)
            .unwrap();
        let expected = Money::from_f64(1350.0 * annuity_factor(0.03, 25)).unwrap();
        assert_eq!(half, expected);
    }

    #[test]
    fn test_invalid_policy_is_config_error() {
        let policy = LoanPolicy {
            income_ratio: 2.0,
            ..LoanPolicy::default()
        };
        let err = BudgetCalculator::new(&policy)
            .compute(&household(9000, 0, 0))
            .unwrap_err();
        assert!(matches!(err, AgentError::Config(_)));
    }

    #[test]
    fn test_idempotent() {
        let input = household(7000, 10_000, 30_000);
        assert_eq!(compute_budget(&input).unwrap(), compute_budget(&input).unwrap());
    }

    #[test]
    fn test_evaluate_price() {
        let policy = LoanPolicy::default();
        let calculator = BudgetCalculator::new(&policy);
        let input = household(9000, 20_000, 50_000);
        let budget = calculator.compute(&input).unwrap();

        let affordable = calculator.evaluate(&input, budget.total_budget).unwrap();
        assert_eq!(affordable.affordability_status, AffordabilityStatus::Affordable);
        assert!(affordable.shortfall.is_zero());

        let price = budget.total_budget + Money::from_dollars(1234);
        let short = calculator.evaluate(&input, price).unwrap();
        assert_eq!(short.affordability_status, AffordabilityStatus::NotAffordable);
        assert_eq!(short.shortfall, Money::from_dollars(1234));
        assert_eq!(short.max_hdb_loan, budget.max_hdb_loan);
    }

    #[test]
    fn test_split_cpf() {
        let (used, retained) = split_cpf(Money::from_dollars(120_000), Money::from_dollars(20_000));
        assert_eq!(used, Money::from_dollars(100_000));
        assert_eq!(retained, Money::from_dollars(20_000));

        let (used, retained) = split_cpf(Money::from_dollars(5_000), Money::from_dollars(20_000));
        assert!(used.is_zero());
        assert_eq!(retained, Money::from_dollars(5_000));
    }
}
