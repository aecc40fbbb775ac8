//! Affordability models
//!
//! A listing is judged against a total budget in isolation. Listings that
//! cannot be judged (missing or malformed price) produce a `ListingFailure`
//! in place of a verdict so the rest of the batch still goes through.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::raw::{json_kind, require, RawValue};
use crate::error::{AgentError, AgentResult};

/// Verdict for one listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffordabilityStatus {
    #[serde(rename = "Affordable")]
    Affordable,
    #[serde(rename = "Not Affordable")]
    NotAffordable,
}

impl AffordabilityStatus {
    /// Status implied by a shortfall
    pub fn from_shortfall(shortfall: Money) -> Self {
        if shortfall.is_zero() {
            Self::Affordable
        } else {
            Self::NotAffordable
        }
    }

    pub fn is_affordable(&self) -> bool {
        matches!(self, Self::Affordable)
    }
}

impl fmt::Display for AffordabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Affordable => write!(f, "Affordable"),
            Self::NotAffordable => write!(f, "Not Affordable"),
        }
    }
}

/// A named flat price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPrice {
    pub name: String,
    pub price: Money,
}

impl ListingPrice {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// A listing as received, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<RawValue>,
}

impl ListingInput {
    pub fn new(name: impl Into<String>, price: impl Into<RawValue>) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price.into()),
        }
    }

    /// Name to report for this listing; unnamed listings use their 1-based position
    pub fn display_name(&self, index: usize) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("listing-{}", index + 1),
        }
    }

    /// Validate into a typed listing
    pub fn resolve(&self, index: usize) -> AgentResult<ListingPrice> {
        let price = require(&self.price, "price")?.to_money("price")?;
        Ok(ListingPrice::new(self.display_name(index), price))
    }
}

/// One element of a listings array, kept even when it is not a listing object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingEntry {
    Listing(ListingInput),
    Malformed(serde_json::Value),
}

impl ListingEntry {
    pub fn display_name(&self, index: usize) -> String {
        match self {
            Self::Listing(listing) => listing.display_name(index),
            Self::Malformed(_) => format!("listing-{}", index + 1),
        }
    }

    pub fn resolve(&self, index: usize) -> AgentResult<ListingPrice> {
        match self {
            Self::Listing(listing) => listing.resolve(index),
            Self::Malformed(value) => Err(malformed_listing(value)),
        }
    }
}

impl From<ListingInput> for ListingEntry {
    fn from(listing: ListingInput) -> Self {
        Self::Listing(listing)
    }
}

fn malformed_listing(value: &serde_json::Value) -> AgentError {
    match value.get("name") {
        Some(name) if !name.is_string() && !name.is_null() => {
            AgentError::invalid("name", format!("expected a string, got {}", json_kind(name)))
        }
        _ => AgentError::invalid(
            "listing",
            format!("expected an object with a price, got {}", json_kind(value)),
        ),
    }
}

/// Verdict for one listing against a total budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub name: String,
    pub price: Money,
    pub affordability_status: AffordabilityStatus,
    /// Amount by which the price exceeds the budget; zero when affordable
    pub shortfall: Money,
}

impl AffordabilityResult {
    pub fn is_affordable(&self) -> bool {
        self.affordability_status.is_affordable()
    }
}

/// A listing that could not be judged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFailure {
    pub name: String,
    pub error: String,
    pub field: Option<String>,
}

impl ListingFailure {
    pub fn from_error(name: impl Into<String>, err: &AgentError) -> Self {
        Self {
            name: name.into(),
            error: err.to_string(),
            field: err.field().map(str::to_string),
        }
    }
}

/// Outcome for one listing in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ListingOutcome {
    Assessed(AffordabilityResult),
    Invalid(ListingFailure),
}

impl ListingOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Assessed(result) => &result.name,
            Self::Invalid(failure) => &failure.name,
        }
    }

    pub fn result(&self) -> Option<&AffordabilityResult> {
        match self {
            Self::Assessed(result) => Some(result),
            Self::Invalid(_) => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_with_spaces() {
        assert_eq!(
            serde_json::to_string(&AffordabilityStatus::NotAffordable).unwrap(),
            "\"Not Affordable\""
        );
        assert_eq!(
            serde_json::to_string(&AffordabilityStatus::Affordable).unwrap(),
            "\"Affordable\""
        );
        assert_eq!(AffordabilityStatus::NotAffordable.to_string(), "Not Affordable");
    }

    #[test]
    fn test_status_from_shortfall() {
        assert_eq!(
            AffordabilityStatus::from_shortfall(Money::zero()),
            AffordabilityStatus::Affordable
        );
        assert_eq!(
            AffordabilityStatus::from_shortfall(Money::from_cents(1)),
            AffordabilityStatus::NotAffordable
        );
    }

    #[test]
    fn test_listing_display_name() {
        let named = ListingInput::new("Tengah Garden", 450_000.0);
        assert_eq!(named.display_name(0), "Tengah Garden");

        let unnamed = ListingInput {
            name: Some("  ".into()),
            price: Some(RawValue::Number(1.0)),
        };
        assert_eq!(unnamed.display_name(2), "listing-3");
    }

    #[test]
    fn test_listing_resolve_missing_price() {
        let listing: ListingInput = serde_json::from_str(r#"{"name": "A"}"#).unwrap();
        let err = listing.resolve(0).unwrap_err();
        assert_eq!(err.field(), Some("price"));
    }

    #[test]
    fn test_entries_keep_malformed_elements() {
        let entries: Vec<ListingEntry> =
            serde_json::from_str(r#"[{"name": "A", "price": 450000}, {"name": 42, "price": 1}, null, 7]"#)
                .unwrap();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0], ListingEntry::Listing(ListingInput::new("A", 450_000.0)));
        assert_eq!(entries[0].resolve(0).unwrap().price, Money::from_dollars(450_000));

        let err = entries[1].resolve(1).unwrap_err();
        assert_eq!(err.field(), Some("name"));
        assert!(err.to_string().contains("a number"));
        assert_eq!(entries[1].display_name(1), "listing-2");

        assert_eq!(entries[2].resolve(2).unwrap_err().field(), Some("listing"));
        assert!(entries[3].resolve(3).unwrap_err().to_string().contains("got a number"));
    }

    #[test]
    fn test_outcome_serializes_flat() {
        let outcome = ListingOutcome::Assessed(AffordabilityResult {
            name: "A".into(),
            price: Money::from_dollars(450_000),
            affordability_status: AffordabilityStatus::Affordable,
            shortfall: Money::zero(),
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["name"], "A");
        assert_eq!(json["affordability_status"], "Affordable");
        assert_eq!(json["shortfall"], 0);
    }
}
