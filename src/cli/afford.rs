//! `afford` command

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use super::{arg_value, session, CliContext};
use crate::error::AgentResult;
use crate::models::{ListingEntry, ListingInput};
use crate::request::{AffordabilityRequest, Envelope, Request};
use crate::services::import::load_listings;

#[derive(Args, Debug, Clone)]
pub struct AffordArgs {
    /// Total budget to compare against
    #[arg(long)]
    pub budget: String,

    /// A listing as NAME=PRICE, or just PRICE (repeatable)
    #[arg(short, long = "listing")]
    pub listings: Vec<String>,

    /// Listings file (.csv with name,price columns, or .json)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    #[arg(long)]
    pub session: Option<String>,
}

/// Split `NAME=PRICE` on the last `=`; a bare value is an unnamed price
pub fn parse_listing_arg(raw: &str) -> ListingInput {
    match raw.rsplit_once('=') {
        Some((name, price)) => {
            let name = name.trim();
            ListingInput {
                name: (!name.is_empty()).then(|| name.to_string()),
                price: (!price.trim().is_empty()).then(|| arg_value(price.trim())),
            }
        }
        None => ListingInput {
            name: None,
            price: Some(arg_value(raw.trim())),
        },
    }
}

/// Handle the afford command
pub fn handle_afford_command<W: Write>(
    ctx: &CliContext,
    args: &AffordArgs,
    out: &mut W,
) -> AgentResult<()> {
    let mut listings: Vec<ListingEntry> = args
        .listings
        .iter()
        .map(|l| parse_listing_arg(l).into())
        .collect();
    if let Some(path) = &args.file {
        listings.extend(load_listings(path)?);
    }

    let request = AffordabilityRequest {
        total_budget: Some(arg_value(&args.budget)),
        listings,
    };
    let envelope =
        Envelope::new(Request::Affordability(request)).with_session(session(&args.session));
    ctx.run(&envelope, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawValue;

    #[test]
    fn test_parse_listing_arg() {
        let listing = parse_listing_arg("Tengah Garden=450,000");
        assert_eq!(listing.name.as_deref(), Some("Tengah Garden"));
        assert_eq!(listing.price, Some(RawValue::Text("450,000".into())));

        let bare = parse_listing_arg("310000");
        assert!(bare.name.is_none());
        assert_eq!(bare.price, Some(RawValue::Text("310000".into())));

        let no_price = parse_listing_arg("Bayshore=");
        assert_eq!(no_price.name.as_deref(), Some("Bayshore"));
        assert!(no_price.price.is_none());

        let eq_in_name = parse_listing_arg("A=B=5");
        assert_eq!(eq_in_name.name.as_deref(), Some("A=B"));
    }
}
