//! Request/response boundary
//!
//! A request is a JSON object tagged by `operation`. It is validated here
//! into typed inputs, run through the services, and answered with an
//! envelope: `{"ok": true, "input": ..., "calculation": ...}` on success or
//! `{"ok": false, "error": ...}` on failure.
//!
//! ```rust
//! use agentbto::models::LoanPolicy;
//! use agentbto::request::RequestHandler;
//!
//! let policy = LoanPolicy::default();
//! let handler = RequestHandler::new(&policy);
//! let response = handler.handle_json(
//!     r#"{"operation": "affordability", "total_budget": 500000,
//!         "listings": [{"name": "A", "price": 450000}]}"#,
//! );
//! assert!(response.ok);
//! ```

mod handler;
mod response;

pub use handler::{Calculation, RequestHandler};
pub use response::Response;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AgentError, AgentResult};
use crate::models::{BudgetRequest, EstimateEntry, ListingEntry, RawValue, SessionId};

/// The operations a request can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Income and savings to maximum loan and total budget
    Budget,
    /// Total budget against a list of listing prices
    Affordability,
    /// Budget plus the verdict for one BTO price
    Evaluate,
    /// Total budget against cost estimates with confidence intervals
    Estimates,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Budget => "budget",
            Operation::Affordability => "affordability",
            Operation::Evaluate => "evaluate",
            Operation::Estimates => "estimates",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(Operation::Budget),
            "affordability" | "afford" => Ok(Operation::Affordability),
            "evaluate" => Ok(Operation::Evaluate),
            "estimates" => Ok(Operation::Estimates),
            other => Err(AgentError::invalid(
                "operation",
                format!(
                    "unknown operation '{}' (expected budget, affordability, evaluate or estimates)",
                    other
                ),
            )),
        }
    }
}

/// Total budget against a set of listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<RawValue>,
    #[serde(default)]
    pub listings: Vec<ListingEntry>,
}

/// Budget fields plus one price
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_income: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_savings: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf_savings: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_rate: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure_years: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retain_oa_amount: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bto_price: Option<RawValue>,
}

impl EvaluateRequest {
    /// The budget portion of the request
    pub fn budget(&self) -> BudgetRequest {
        BudgetRequest {
            household_income: self.household_income.clone(),
            cash_savings: self.cash_savings.clone(),
            cpf_savings: self.cpf_savings.clone(),
            annual_rate: self.annual_rate.clone(),
            tenure_years: self.tenure_years.clone(),
            retain_oa_amount: self.retain_oa_amount.clone(),
        }
    }
}

/// Total budget against a keyed batch of estimates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatesRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<RawValue>,
    #[serde(default)]
    pub estimates: BTreeMap<String, EstimateEntry>,
}

/// A request of any operation
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Budget(BudgetRequest),
    Affordability(AffordabilityRequest),
    Evaluate(EvaluateRequest),
    Estimates(EstimatesRequest),
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::Budget(_) => Operation::Budget,
            Request::Affordability(_) => Operation::Affordability,
            Request::Evaluate(_) => Operation::Evaluate,
            Request::Estimates(_) => Operation::Estimates,
        }
    }

    /// Decode the body of a request for a known operation
    pub fn from_value(operation: Operation, body: Value) -> AgentResult<Self> {
        let shape = |e: serde_json::Error| AgentError::invalid("request", e.to_string());
        Ok(match operation {
            Operation::Budget => Request::Budget(serde_json::from_value(body).map_err(shape)?),
            Operation::Affordability => {
                Request::Affordability(serde_json::from_value(body).map_err(shape)?)
            }
            Operation::Evaluate => Request::Evaluate(serde_json::from_value(body).map_err(shape)?),
            Operation::Estimates => {
                Request::Estimates(serde_json::from_value(body).map_err(shape)?)
            }
        })
    }
}

/// A parsed request with its routing fields
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub operation: Operation,
    pub session_id: Option<SessionId>,
    pub request: Request,
}

impl Envelope {
    pub fn new(request: Request) -> Self {
        Self {
            operation: request.operation(),
            session_id: None,
            request,
        }
    }

    pub fn with_session(mut self, session_id: Option<SessionId>) -> Self {
        self.session_id = session_id;
        self
    }

    /// Parse a JSON document into a request.
    ///
    /// On failure, returns whatever routing information could be recovered
    /// alongside the error so the response can still echo it.
    pub fn parse(text: &str) -> Result<Self, (Option<Operation>, Option<SessionId>, AgentError)> {
        let mut value: Value = serde_json::from_str(text)
            .map_err(|e| (None, None, AgentError::invalid("request", format!("malformed JSON: {}", e))))?;

        let object = value.as_object_mut().ok_or_else(|| {
            (
                None,
                None,
                AgentError::invalid("request", "expected a JSON object"),
            )
        })?;

        let session_id = match object.remove("session_id") {
            Some(Value::String(s)) => Some(SessionId::new(s)),
            Some(Value::Number(n)) => Some(SessionId::new(n.to_string())),
            _ => None,
        };

        let operation = match object.remove("operation") {
            Some(Value::String(op)) => op.parse::<Operation>().map_err(|e| (None, session_id.clone(), e))?,
            Some(_) => {
                return Err((
                    None,
                    session_id,
                    AgentError::invalid("operation", "expected a string"),
                ))
            }
            None => return Err((None, session_id, AgentError::missing("operation"))),
        };

        let request = Request::from_value(operation, value)
            .map_err(|e| (Some(operation), session_id.clone(), e))?;

        Ok(Self {
            operation,
            session_id,
            request,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_parse() {
        assert_eq!("budget".parse::<Operation>().unwrap(), Operation::Budget);
        assert_eq!("Afford".parse::<Operation>().unwrap(), Operation::Affordability);
        let err = "transport".parse::<Operation>().unwrap_err();
        assert_eq!(err.field(), Some("operation"));
    }

    #[test]
    fn test_parse_budget_envelope() {
        let envelope = Envelope::parse(
            r#"{"operation": "budget", "session_id": "abc",
                "household_income": 9000, "cash_savings": 0, "cpf_savings": 0}"#,
        )
        .unwrap();
        assert_eq!(envelope.operation, Operation::Budget);
        assert_eq!(envelope.session_id, Some(SessionId::new("abc")));
        match envelope.request {
            Request::Budget(req) => assert_eq!(req.household_income, Some(RawValue::Number(9000.0))),
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_parse_failures_keep_routing_info() {
        let (op, session, err) = Envelope::parse("{not json").unwrap_err();
        assert!(op.is_none() && session.is_none());
        assert_eq!(err.field(), Some("request"));

        let (op, session, err) = Envelope::parse(r#"{"session_id": "s1"}"#).unwrap_err();
        assert!(op.is_none());
        assert_eq!(session, Some(SessionId::new("s1")));
        assert_eq!(err.field(), Some("operation"));

        let (op, _, err) =
            Envelope::parse(r#"{"operation": "affordability", "listings": "none"}"#).unwrap_err();
        assert_eq!(op, Some(Operation::Affordability));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_malformed_items_do_not_fail_the_envelope() {
        let envelope = Envelope::parse(
            r#"{"operation": "affordability", "total_budget": 1,
                "listings": [{"name": "A", "price": 1}, {"name": 42}, null]}"#,
        )
        .unwrap();
        match envelope.request {
            Request::Affordability(req) => {
                assert_eq!(req.listings.len(), 3);
                assert!(matches!(req.listings[2], ListingEntry::Malformed(_)));
            }
            other => panic!("unexpected request {:?}", other),
        }

        let envelope = Envelope::parse(
            r#"{"operation": "estimates", "total_budget": 1, "estimates": {"x": "n/a"}}"#,
        )
        .unwrap();
        assert!(matches!(envelope.request, Request::Estimates(_)));
    }

    #[test]
    fn test_evaluate_request_budget_portion() {
        let envelope = Envelope::parse(
            r#"{"operation": "evaluate", "household_income": 9000, "cash_savings": 1,
                "cpf_savings": 2, "bto_price": 350000}"#,
        )
        .unwrap();
        match envelope.request {
            Request::Evaluate(req) => {
                assert_eq!(req.budget().cpf_savings, Some(RawValue::Number(2.0)));
                assert_eq!(req.bto_price, Some(RawValue::Number(350000.0)));
            }
            other => panic!("unexpected request {:?}", other),
        }
    }
}
