//! Display formatting for terminal output

pub mod affordability;
pub mod budget;
pub mod estimate;
pub mod report;

pub use affordability::format_affordability;
pub use budget::{format_budget, format_evaluation};
pub use estimate::format_estimates;

use crate::request::Calculation;

/// Human-readable rendering of any calculation
pub fn format_calculation(calculation: &Calculation, symbol: &str) -> String {
    match calculation {
        Calculation::Budget { input, result } => format_budget(input, result, symbol),
        Calculation::Affordability {
            total_budget,
            outcomes,
            ..
        } => format_affordability(*total_budget, outcomes, symbol),
        Calculation::Evaluate {
            input,
            bto_price,
            result,
        } => format_evaluation(input, *bto_price, result, symbol),
        Calculation::Estimates {
            total_budget,
            outcomes,
        } => format_estimates(*total_budget, outcomes, symbol),
    }
}
