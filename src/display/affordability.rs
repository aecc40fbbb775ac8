//! Listing comparison table

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::report::labelled;
use crate::models::{ListingOutcome, Money};

#[derive(Tabled)]
struct ListingRow {
    #[tabled(rename = "Listing")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Shortfall")]
    shortfall: String,
}

/// Format affordability outcomes as a table, invalid rows included
pub fn format_affordability(total_budget: Money, outcomes: &[ListingOutcome], symbol: &str) -> String {
    let header = labelled("Total budget", &total_budget.format_with_symbol(symbol), 30);

    if outcomes.is_empty() {
        return format!("{}\nNo listings to compare.\n", header);
    }

    let rows = outcomes.iter().map(|outcome| match outcome {
        ListingOutcome::Assessed(r) => ListingRow {
            name: r.name.clone(),
            price: r.price.format_with_symbol(symbol),
            status: r.affordability_status.to_string(),
            shortfall: if r.shortfall.is_zero() {
                "-".to_string()
            } else {
                r.shortfall.format_with_symbol(symbol)
            },
        },
        ListingOutcome::Invalid(f) => ListingRow {
            name: f.name.clone(),
            price: "-".to_string(),
            status: format!("Error: {}", f.error),
            shortfall: "-".to_string(),
        },
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..2), Alignment::right())
        .modify(Columns::new(3..4), Alignment::right());

    let affordable = outcomes
        .iter()
        .filter(|o| o.result().map(|r| r.is_affordable()).unwrap_or(false))
        .count();

    format!(
        "{}\n{}\n{} of {} listings affordable\n",
        header,
        table,
        affordable,
        outcomes.len()
    )
}
