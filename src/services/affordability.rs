//! Affordability comparator
//!
//! Judges listing prices against a total budget, one listing at a time.

use tracing::{debug, warn};

use crate::models::{
    AffordabilityResult, AffordabilityStatus, ListingEntry, ListingFailure, ListingOutcome,
    ListingPrice, Money,
};

/// Judge one price against a total budget
pub fn assess_price(total_budget: Money, name: impl Into<String>, price: Money) -> AffordabilityResult {
    let shortfall = price.excess_over(total_budget);
    AffordabilityResult {
        name: name.into(),
        price,
        affordability_status: AffordabilityStatus::from_shortfall(shortfall),
        shortfall,
    }
}

/// Judge already-validated listings, preserving their order
pub fn check_affordability(total_budget: Money, listings: &[ListingPrice]) -> Vec<AffordabilityResult> {
    listings
        .iter()
        .map(|listing| assess_price(total_budget, listing.name.clone(), listing.price))
        .collect()
}

/// Judge raw listings; a bad price or a malformed entry fails only its own listing
pub fn check_listings(total_budget: Money, listings: &[ListingEntry]) -> Vec<ListingOutcome> {
    listings
        .iter()
        .enumerate()
        .map(|(index, listing)| match listing.resolve(index) {
            Ok(resolved) => {
                let result = assess_price(total_budget, resolved.name, resolved.price);
                debug!(listing = %result.name, status = %result.affordability_status, "assessed listing");
                ListingOutcome::Assessed(result)
            }
            Err(err) => {
                let name = listing.display_name(index);
                warn!(listing = %name, error = %err, "skipping invalid listing");
                ListingOutcome::Invalid(ListingFailure::from_error(name, &err))
            }
        })
        .collect()
}
