//! Service layer for AgentBTO
//!
//! Pure calculations over validated models: loan math, budgets,
//! affordability verdicts and estimate assessment. `import` loads
//! comparison sets from disk for the CLI.

pub mod affordability;
pub mod budget;
pub mod estimate;
pub mod import;
pub mod loan;

pub use affordability::{assess_price, check_affordability, check_listings};
pub use budget::{compute_budget, BudgetCalculator};
pub use estimate::{assess_estimate, assess_estimates};
