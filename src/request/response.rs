//! Response envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Calculation, Operation};
use crate::error::{AgentError, AgentResult};
use crate::models::SessionId;

/// `{"ok": true, "input", "calculation"}` or `{"ok": false, "error"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Offending input field, when the error is about one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Response {
    pub fn success(calculation: &Calculation) -> AgentResult<Self> {
        Ok(Self {
            ok: true,
            operation: Some(calculation.operation()),
            session_id: None,
            input: Some(calculation.input_json()?),
            calculation: Some(calculation.result_json()?),
            error: None,
            field: None,
        })
    }

    pub fn failure(operation: Option<Operation>, err: &AgentError) -> Self {
        Self {
            ok: false,
            operation,
            session_id: None,
            input: None,
            calculation: None,
            error: Some(err.to_string()),
            field: err.field().map(str::to_string),
        }
    }

    pub fn with_session(mut self, session_id: Option<SessionId>) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn to_json_pretty(&self) -> AgentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetInput, BudgetResult, Money};

    #[test]
    fn test_failure_shape() {
        let err = AgentError::missing("cash_savings");
        let response = Response::failure(Some(Operation::Budget), &err)
            .with_session(Some(SessionId::new("s1")));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["operation"], "budget");
        assert_eq!(json["session_id"], "s1");
        assert_eq!(json["field"], "cash_savings");
        assert!(json.get("calculation").is_none());
        assert!(json.get("input").is_none());
    }

    #[test]
    fn test_success_shape() {
        let input = BudgetInput::new(Money::from_dollars(0), Money::zero(), Money::zero());
        let calculation = Calculation::Budget {
            input,
            result: BudgetResult {
                max_hdb_loan: Money::zero(),
                total_budget: Money::zero(),
                cpf_used_in_budget: Money::zero(),
                retained_oa: Money::zero(),
            },
        };

        let response = Response::success(&calculation).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["calculation"]["total_budget"], 0);
        assert!(json.get("error").is_none());
        assert!(json.get("session_id").is_none());
    }
}
