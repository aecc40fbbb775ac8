//! Estimate assessment
//!
//! Compares a budget with a cost estimate and its confidence interval, and
//! explains the result in a sentence or three.

use std::collections::BTreeMap;

use tracing::warn;

use crate::models::{
    AffordabilityStatus, Confidence, EstimateAssessment, EstimateEntry, EstimateFailure,
    EstimateOutcome, Money, PriceEstimate,
};

const SYMBOL: &str = "$";

/// Place a budget relative to the estimate's interval
pub fn classify_confidence(
    total_budget: Money,
    ci_lower: Option<Money>,
    ci_upper: Option<Money>,
) -> Confidence {
    match (ci_lower, ci_upper) {
        (Some(lo), Some(hi)) => {
            if total_budget >= hi {
                Confidence::LikelyAffordable
            } else if total_budget < lo {
                Confidence::LikelyUnaffordable
            } else {
                Confidence::Borderline
            }
        }
        (Some(lo), None) => {
            if total_budget >= lo {
                Confidence::LikelyAffordable
            } else {
                Confidence::LikelyUnaffordable
            }
        }
        (None, Some(hi)) => {
            if total_budget >= hi {
                Confidence::LikelyAffordable
            } else {
                Confidence::Borderline
            }
        }
        (None, None) => Confidence::Unknown,
    }
}

/// Judge a budget against one validated estimate
pub fn assess_estimate(total_budget: Money, estimate: &PriceEstimate) -> EstimateAssessment {
    let shortfall = estimate.estimated_price.excess_over(total_budget);
    let confidence = classify_confidence(total_budget, estimate.ci_lower, estimate.ci_upper);

    EstimateAssessment {
        affordability_status: AffordabilityStatus::from_shortfall(shortfall),
        shortfall,
        margin_vs_estimate: total_budget - estimate.estimated_price,
        confidence,
        explanation: explain(total_budget, estimate, confidence),
    }
}

/// Judge a keyed batch of raw estimates; failures stay scoped to their key
pub fn assess_estimates(
    total_budget: Money,
    estimates: &BTreeMap<String, EstimateEntry>,
) -> BTreeMap<String, EstimateOutcome> {
    estimates
        .iter()
        .map(|(id, input)| {
            let outcome = match input.resolve() {
                Ok(estimate) => EstimateOutcome::Assessed(assess_estimate(total_budget, &estimate)),
                Err(err) => {
                    warn!(id = %id, error = %err, "affordability assessment failed");
                    EstimateOutcome::Failed(EstimateFailure::from_error(&err))
                }
            };
            (id.clone(), outcome)
        })
        .collect()
}

fn explain(total_budget: Money, estimate: &PriceEstimate, confidence: Confidence) -> String {
    let fmt = |amount: Option<Money>| match amount {
        Some(m) => m.format_whole(SYMBOL),
        None => "N/A".to_string(),
    };

    let mut parts = vec![format!(
        "Budget {} vs estimate {}.",
        total_budget.format_whole(SYMBOL),
        estimate.estimated_price.format_whole(SYMBOL)
    )];

    if estimate.ci_lower.is_some() || estimate.ci_upper.is_some() {
        parts.push(format!(
            "95% CI: {} - {}.",
            fmt(estimate.ci_lower),
            fmt(estimate.ci_upper)
        ));
    }

    parts.push(
        match confidence {
            Confidence::LikelyAffordable => {
                "Your budget exceeds the upper bound, suggesting comfortable affordability."
            }
            Confidence::LikelyUnaffordable => {
                "Your budget is below the lower bound; affordability is unlikely."
            }
            Confidence::Borderline => {
                "Your budget intersects the CI; outcome is uncertain and depends on final pricing."
            }
            Confidence::Unknown => "Unable to assess confidence due to missing CI.",
        }
        .to_string(),
    );

    parts.join(" ")
}
