//! Loosely typed request values
//!
//! Upstream callers send amounts as JSON numbers, numeric strings or, by
//! mistake, something else entirely. `RawValue` captures all three so that
//! validation can name the offending field instead of failing the whole
//! document.

use serde::{Deserialize, Serialize};

use super::money::{Money, MoneyParseError};
use super::policy::MAX_TENURE_YEARS;
use crate::error::{AgentError, AgentResult};

/// A request value before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    /// Interpret the value as a finite number
    pub fn to_number(&self, field: &str) -> AgentResult<f64> {
        let value = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => {
                let cleaned: String = s
                    .trim()
                    .trim_start_matches('$')
                    .chars()
                    .filter(|c| *c != ',')
                    .collect();
                cleaned
                    .parse::<f64>()
                    .map_err(|_| AgentError::invalid(field, format!("'{}' is not a number", s)))?
            }
            RawValue::Other(v) => {
                return Err(AgentError::invalid(
                    field,
                    format!("expected a number, got {}", json_kind(v)),
                ))
            }
        };

        if !value.is_finite() {
            return Err(AgentError::invalid(field, "must be a finite number"));
        }
        Ok(value)
    }

    /// Interpret the value as a non-negative currency amount
    pub fn to_money(&self, field: &str) -> AgentResult<Money> {
        let amount = match self {
            RawValue::Text(s) => match Money::parse(s) {
                Ok(m) => m,
                Err(MoneyParseError::OutOfRange(_)) => return Err(out_of_range(field)),
                Err(MoneyParseError::InvalidFormat(_)) => {
                    money_from_number(self.to_number(field)?, field)?
                }
            },
            _ => money_from_number(self.to_number(field)?, field)?,
        };

        if amount.is_negative() {
            return Err(AgentError::invalid(field, "must not be negative"));
        }
        Ok(amount)
    }

    /// Interpret the value as an annual interest rate fraction
    pub fn to_rate(&self, field: &str) -> AgentResult<f64> {
        let rate = self.to_number(field)?;
        if rate < 0.0 {
            return Err(AgentError::invalid(field, "must not be negative"));
        }
        if rate > 1.0 {
            return Err(AgentError::invalid(
                field,
                "expected a fraction such as 0.03, not a percentage",
            ));
        }
        Ok(rate)
    }

    /// Interpret the value as a whole number of years
    pub fn to_tenure(&self, field: &str) -> AgentResult<u32> {
        let years = self.to_number(field)?;
        if years < 0.0 {
            return Err(AgentError::invalid(field, "must not be negative"));
        }
        if years.fract() != 0.0 {
            return Err(AgentError::invalid(field, "must be a whole number of years"));
        }
        if years > MAX_TENURE_YEARS as f64 {
            return Err(AgentError::invalid(
                field,
                format!("must be at most {} years", MAX_TENURE_YEARS),
            ));
        }
        Ok(years as u32)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// Return the value of a field the caller was required to send
pub fn require<'a>(value: &'a Option<RawValue>, field: &str) -> AgentResult<&'a RawValue> {
    match value {
        None | Some(RawValue::Other(serde_json::Value::Null)) => Err(AgentError::missing(field)),
        Some(v) => Ok(v),
    }
}

/// Return the value of an optional field, treating JSON null as absent
pub fn optional(value: &Option<RawValue>) -> Option<&RawValue> {
    match value {
        None | Some(RawValue::Other(serde_json::Value::Null)) => None,
        Some(v) => Some(v),
    }
}

fn out_of_range(field: &str) -> AgentError {
    AgentError::invalid(field, "amount out of range")
}

fn money_from_number(value: f64, field: &str) -> AgentResult<Money> {
    Money::from_f64(value).ok_or_else(|| out_of_range(field))
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RawValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_deserializes_all_shapes() {
        assert_eq!(parse("9000"), RawValue::Number(9000.0));
        assert_eq!(parse("\"9000\""), RawValue::Text("9000".into()));
        assert!(matches!(parse("true"), RawValue::Other(_)));
        assert!(matches!(parse("[1, 2]"), RawValue::Other(_)));
    }

    #[test]
    fn test_money_from_number_and_text() {
        assert_eq!(parse("450000").to_money("price").unwrap(), Money::from_dollars(450_000));
        assert_eq!(
            parse("\"$450,000.50\"").to_money("price").unwrap(),
            Money::from_cents(45_000_050)
        );
        assert_eq!(parse("\"1e3\"").to_money("price").unwrap(), Money::from_dollars(1000));
    }

    #[test]
    fn test_money_rejects_negative_and_garbage() {
        let err = parse("-1").to_money("cash_savings").unwrap_err();
        assert_eq!(err.field(), Some("cash_savings"));
        assert!(err.to_string().contains("negative"));

        let err = parse("\"lots\"").to_money("cash_savings").unwrap_err();
        assert!(err.is_invalid_input());

        let err = parse("{\"a\": 1}").to_money("price").unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_money_text_agrees_with_number() {
        assert_eq!(
            parse("\"1234.567\"").to_money("price").unwrap(),
            parse("1234.567").to_money("price").unwrap()
        );

        let err = parse("\"$-0.50\"").to_money("price").unwrap_err();
        assert!(err.to_string().contains("negative"));

        for huge in ["\"90000000000000000\"", "90000000000000000", "\"1e20\""] {
            let err = parse(huge).to_money("cash_savings").unwrap_err();
            assert_eq!(
                err,
                AgentError::invalid("cash_savings", "amount out of range"),
                "{}",
                huge
            );
        }
    }

    #[test]
    fn test_rate_bounds() {
        assert_eq!(parse("0.03").to_rate("annual_rate").unwrap(), 0.03);
        assert_eq!(parse("\"0\"").to_rate("annual_rate").unwrap(), 0.0);
        assert!(parse("-0.01").to_rate("annual_rate").is_err());
        assert!(parse("3").to_rate("annual_rate").is_err());
    }

    #[test]
    fn test_tenure_must_be_whole() {
        assert_eq!(parse("25").to_tenure("tenure_years").unwrap(), 25);
        assert_eq!(parse("\"30\"").to_tenure("tenure_years").unwrap(), 30);
        assert!(parse("25.5").to_tenure("tenure_years").is_err());
        assert!(parse("-5").to_tenure("tenure_years").is_err());
        assert!(parse("1000").to_tenure("tenure_years").is_err());
    }

    #[test]
    fn test_require_treats_null_as_missing() {
        let absent: Option<RawValue> = None;
        let null = Some(RawValue::Other(serde_json::Value::Null));
        assert!(require(&absent, "price").is_err());
        assert!(require(&null, "price").is_err());
        assert!(optional(&null).is_none());
        assert!(require(&Some(RawValue::Number(1.0)), "price").is_ok());
    }
}
