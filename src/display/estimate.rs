//! Estimate assessment view

use std::collections::BTreeMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::labelled;
use crate::models::{EstimateOutcome, Money};

#[derive(Tabled)]
struct EstimateRow {
    #[tabled(rename = "Estimate")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Margin")]
    margin: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

/// Format assessed estimates as a table followed by their explanations
pub fn format_estimates(
    total_budget: Money,
    outcomes: &BTreeMap<String, EstimateOutcome>,
    symbol: &str,
) -> String {
    let mut output = labelled("Total budget", &total_budget.format_with_symbol(symbol), 30);
    output.push('\n');

    if outcomes.is_empty() {
        output.push_str("No estimates to assess.\n");
        return output;
    }

    let rows = outcomes.iter().map(|(id, outcome)| match outcome {
        EstimateOutcome::Assessed(a) => EstimateRow {
            id: id.clone(),
            status: a.affordability_status.to_string(),
            margin: a.margin_vs_estimate.format_with_symbol(symbol),
            confidence: a.confidence.to_string(),
        },
        EstimateOutcome::Failed(f) => EstimateRow {
            id: id.clone(),
            status: "error".to_string(),
            margin: "-".to_string(),
            confidence: f.confidence.to_string(),
        },
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output.push_str(&table.to_string());
    output.push_str("\n\n");

    for (id, outcome) in outcomes {
        let note = match outcome {
            EstimateOutcome::Assessed(a) => a.explanation.clone(),
            EstimateOutcome::Failed(f) => f.error.clone(),
        };
        output.push_str(&format!("{}: {}\n", id, note));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EstimateEntry;
    use crate::services::assess_estimates;

    #[test]
    fn test_format_estimates() {
        let mut batch = BTreeMap::new();
        batch.insert(
            "queenstown-4rm".to_string(),
            serde_json::from_str::<EstimateEntry>(
                r#"{"estimatedPrice": 650000, "ciLower": 600000, "ciUpper": 700000}"#,
            )
            .unwrap(),
        );
        batch.insert(
            "missing".to_string(),
            serde_json::from_str::<EstimateEntry>("{}").unwrap(),
        );

        let budget = Money::from_dollars(620_000);
        let output = format_estimates(budget, &assess_estimates(budget, &batch), "$");

        assert!(output.contains("queenstown-4rm"));
        assert!(output.contains("borderline"));
        assert!(output.contains("-$30000.00"));
        assert!(output.contains("Budget $620,000 vs estimate $650,000."));
        assert!(output.contains("missing: "));
    }
}
