//! Formatting helpers shared by the text views

use crate::models::Money;

/// Format a money amount with color hints for terminal display
pub fn format_money_colored(amount: Money, symbol: &str) -> String {
    let text = amount.format_with_symbol(symbol);
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text) // Red for negative
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", text) // Green for positive
    } else {
        text
    }
}

/// Format a fractional rate as a percentage, e.g. `0.026` -> `2.60%`
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

pub fn format_header(title: &str, width: usize) -> String {
    let padding = width.saturating_sub(title.len()) / 2;
    format!("{}{}", " ".repeat(padding), title)
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// A `label ..... value` line, value right-aligned
pub fn labelled(label: &str, value: &str, width: usize) -> String {
    let gap = width.saturating_sub(label.chars().count() + value.chars().count()).max(1);
    format!("{}{}{}", label, " ".repeat(gap), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.03), "3.00%");
        assert_eq!(format_rate(0.026), "2.60%");
        assert_eq!(format_rate(0.0), "0.00%");
    }

    #[test]
    fn test_money_colors() {
        assert!(format_money_colored(Money::from_dollars(-5), "$").contains("\x1b[31m"));
        assert!(format_money_colored(Money::from_dollars(5), "$").contains("\x1b[32m"));
        assert_eq!(format_money_colored(Money::zero(), "$"), "$0.00");
    }

    #[test]
    fn test_labelled() {
        assert_eq!(labelled("Loan", "$1.00", 12), "Loan   $1.00");
        assert_eq!(labelled("A very long label", "$1.00", 5), "A very long label $1.00");
    }

    #[test]
    fn test_format_header() {
        assert_eq!(format_header("Budget", 10), "  Budget");
        assert_eq!(format_header("Too long title", 4), "Too long title");
    }
}
