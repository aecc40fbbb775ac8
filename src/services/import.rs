//! Listing import
//!
//! Loads comparison sets from CSV (`name,price` header) or JSON (an array of
//! `{name, price}` objects, or an object with a `listings` array). Values are
//! kept raw so that a bad price fails only its own row.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{AgentError, AgentResult};
use crate::models::{EstimateEntry, ListingEntry, ListingInput, RawValue};

#[derive(Deserialize)]
#[serde(untagged)]
enum ListingDocument {
    Bare(Vec<ListingEntry>),
    Wrapped { listings: Vec<ListingEntry> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EstimateDocument {
    Wrapped { estimates: BTreeMap<String, EstimateEntry> },
    Bare(BTreeMap<String, EstimateEntry>),
}

/// Parse listings from CSV text
pub fn parse_listings_csv(data: &str) -> AgentResult<Vec<ListingInput>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AgentError::invalid("listings", format!("unreadable CSV header: {}", e)))?
        .clone();
    let column = |wanted: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(wanted))
    };
    let name_col = column("name");
    let price_col = column("price")
        .ok_or_else(|| AgentError::invalid("listings", "CSV is missing a 'price' column"))?;

    let mut listings = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            AgentError::invalid("listings", format!("unreadable CSV row {}: {}", row + 1, e))
        })?;

        let name = name_col
            .and_then(|i| record.get(i))
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let price = record
            .get(price_col)
            .filter(|s| !s.is_empty())
            .map(|s| RawValue::Text(s.to_string()));

        listings.push(ListingInput { name, price });
    }

    Ok(listings)
}

/// Parse listings from JSON text
pub fn parse_listings_json(data: &str) -> AgentResult<Vec<ListingEntry>> {
    let document: ListingDocument = serde_json::from_str(data)
        .map_err(|e| AgentError::invalid("listings", format!("expected a list of listings: {}", e)))?;
    Ok(match document {
        ListingDocument::Bare(listings) => listings,
        ListingDocument::Wrapped { listings } => listings,
    })
}

/// Load listings from a `.csv` or `.json` file
pub fn load_listings(path: &Path) -> AgentResult<Vec<ListingEntry>> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| AgentError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let listings = if is_csv {
        parse_listings_csv(&data)?
            .into_iter()
            .map(ListingEntry::from)
            .collect()
    } else {
        parse_listings_json(&data)?
    };

    info!(path = %path.display(), count = listings.len(), "loaded listings");
    Ok(listings)
}

/// Parse a keyed estimate batch, bare or wrapped in `{"estimates": ...}`
pub fn parse_estimates_json(data: &str) -> AgentResult<BTreeMap<String, EstimateEntry>> {
    let document: EstimateDocument = serde_json::from_str(data)
        .map_err(|e| AgentError::invalid("estimates", format!("expected a map of estimates: {}", e)))?;
    Ok(match document {
        EstimateDocument::Wrapped { estimates } => estimates,
        EstimateDocument::Bare(estimates) => estimates,
    })
}

/// Load an estimate batch from a JSON file
pub fn load_estimates(path: &Path) -> AgentResult<BTreeMap<String, EstimateEntry>> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| AgentError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let estimates = parse_estimates_json(&data)?;
    info!(path = %path.display(), count = estimates.len(), "loaded estimates");
    Ok(estimates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_csv() {
        let csv_data = "name,price\nTengah,450000\nBayshore,\"520,000\"\n,310000\nBroken,\n";
        let listings = parse_listings_csv(csv_data).unwrap();

        assert_eq!(listings.len(), 4);
        assert_eq!(listings[0].name.as_deref(), Some("Tengah"));
        assert_eq!(listings[1].price, Some(RawValue::Text("520,000".into())));
        assert!(listings[2].name.is_none());
        assert!(listings[3].price.is_none());
    }

    #[test]
    fn test_parse_csv_requires_price_column() {
        let err = parse_listings_csv("name,cost\nA,1\n").unwrap_err();
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_parse_json_bare_and_wrapped() {
        let bare = parse_listings_json(r#"[{"name": "A", "price": 450000}]"#).unwrap();
        let wrapped = parse_listings_json(r#"{"listings": [{"name": "A", "price": 450000}]}"#).unwrap();
        assert_eq!(bare, wrapped);
        assert!(parse_listings_json("[]").unwrap().is_empty());
        assert!(parse_listings_json("42").is_err());

        let mixed = parse_listings_json(r#"[{"name": "A", "price": 1}, "B", null]"#).unwrap();
        assert_eq!(mixed.len(), 3);
        assert!(matches!(mixed[1], ListingEntry::Malformed(_)));
    }

    #[test]
    fn test_load_listings_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let csv_path = temp_dir.path().join("set.CSV");
        std::fs::write(&csv_path, "name,price\nA,1\n").unwrap();
        assert_eq!(load_listings(&csv_path).unwrap().len(), 1);

        let json_path = temp_dir.path().join("set.json");
        std::fs::write(&json_path, r#"[{"name": "A", "price": 1}, {"name": "B"}]"#).unwrap();
        assert_eq!(load_listings(&json_path).unwrap().len(), 2);

        let missing = temp_dir.path().join("missing.json");
        assert!(matches!(load_listings(&missing), Err(AgentError::Io(_))));
    }

    #[test]
    fn test_parse_estimates() {
        let bare = parse_estimates_json(r#"{"q-4rm": {"estimatedPrice": 650000}}"#).unwrap();
        let wrapped =
            parse_estimates_json(r#"{"estimates": {"q-4rm": {"estimatedPrice": 650000}}}"#).unwrap();
        assert_eq!(bare, wrapped);
        assert!(bare.contains_key("q-4rm"));

        let mixed = parse_estimates_json(r#"{"a": {"estimatedPrice": 1}, "b": 5}"#).unwrap();
        assert!(matches!(mixed["b"], EstimateEntry::Malformed(_)));
    }
}
