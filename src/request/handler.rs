//! Request execution

use std::collections::BTreeMap;

use serde_json::{json, Value};
use tracing::{debug, info_span};

use super::{Envelope, Operation, Request, Response};
use crate::error::AgentResult;
use crate::models::raw::require;
use crate::models::{
    BudgetInput, BudgetResult, EstimateOutcome, ListingOutcome, LoanEvaluation, LoanPolicy, Money,
};
use crate::services::{assess_estimates, check_listings, BudgetCalculator};

/// The typed result of one request, with the validated inputs it came from
#[derive(Debug, Clone, PartialEq)]
pub enum Calculation {
    Budget {
        input: BudgetInput,
        result: BudgetResult,
    },
    Affordability {
        total_budget: Money,
        outcomes: Vec<ListingOutcome>,
    },
    Evaluate {
        input: BudgetInput,
        bto_price: Money,
        result: LoanEvaluation,
    },
    Estimates {
        total_budget: Money,
        outcomes: BTreeMap<String, EstimateOutcome>,
    },
}

impl Calculation {
    pub fn operation(&self) -> Operation {
        match self {
            Calculation::Budget { .. } => Operation::Budget,
            Calculation::Affordability { .. } => Operation::Affordability,
            Calculation::Evaluate { .. } => Operation::Evaluate,
            Calculation::Estimates { .. } => Operation::Estimates,
        }
    }

    /// Sanitised echo of the inputs
    pub fn input_json(&self) -> AgentResult<Value> {
        Ok(match self {
            Calculation::Budget { input, .. } => serde_json::to_value(input)?,
            Calculation::Affordability {
                total_budget,
                outcomes,
            } => {
                let listings: Vec<Value> = outcomes
                    .iter()
                    .map(|outcome| {
                        json!({
                            "name": outcome.name(),
                            "price": outcome.result().map(|r| r.price),
                        })
                    })
                    .collect();
                json!({ "total_budget": total_budget, "listings": listings })
            }
            Calculation::Evaluate {
                input, bto_price, ..
            } => {
                let mut value = serde_json::to_value(input)?;
                if let Value::Object(map) = &mut value {
                    map.insert("bto_price".into(), serde_json::to_value(bto_price)?);
                }
                value
            }
            Calculation::Estimates {
                total_budget,
                outcomes,
            } => json!({ "total_budget": total_budget, "estimate_count": outcomes.len() }),
        })
    }

    /// The computed result
    pub fn result_json(&self) -> AgentResult<Value> {
        Ok(match self {
            Calculation::Budget { result, .. } => serde_json::to_value(result)?,
            Calculation::Affordability { outcomes, .. } => serde_json::to_value(outcomes)?,
            Calculation::Evaluate { result, .. } => serde_json::to_value(result)?,
            Calculation::Estimates { outcomes, .. } => serde_json::to_value(outcomes)?,
        })
    }
}

/// Validates requests and runs them through the services
pub struct RequestHandler<'a> {
    calculator: BudgetCalculator<'a>,
}

impl<'a> RequestHandler<'a> {
    pub fn new(policy: &'a LoanPolicy) -> Self {
        Self {
            calculator: BudgetCalculator::new(policy),
        }
    }

    /// Validate and run a request
    pub fn execute(&self, request: &Request) -> AgentResult<Calculation> {
        let span = info_span!("execute", operation = %request.operation());
        let _guard = span.enter();

        let calculation = match request {
            Request::Budget(req) => {
                let input = req.into_input(self.calculator.policy())?;
                let result = self.calculator.compute(&input)?;
                Calculation::Budget { input, result }
            }
            Request::Affordability(req) => {
                let total_budget =
                    require(&req.total_budget, "total_budget")?.to_money("total_budget")?;
                Calculation::Affordability {
                    total_budget,
                    outcomes: check_listings(total_budget, &req.listings),
                }
            }
            Request::Evaluate(req) => {
                let input = req.budget().into_input(self.calculator.policy())?;
                let bto_price = require(&req.bto_price, "bto_price")?.to_money("bto_price")?;
                let result = self.calculator.evaluate(&input, bto_price)?;
                Calculation::Evaluate {
                    input,
                    bto_price,
                    result,
                }
            }
            Request::Estimates(req) => {
                let total_budget =
                    require(&req.total_budget, "total_budget")?.to_money("total_budget")?;
                Calculation::Estimates {
                    total_budget,
                    outcomes: assess_estimates(total_budget, &req.estimates),
                }
            }
        };

        debug!("request completed");
        Ok(calculation)
    }

    /// Run a parsed request and wrap the outcome in a response envelope
    pub fn respond(&self, envelope: &Envelope) -> Response {
        let outcome = self
            .execute(&envelope.request)
            .and_then(|calculation| Response::success(&calculation));

        match outcome {
            Ok(response) => response.with_session(envelope.session_id.clone()),
            Err(err) => Response::failure(Some(envelope.operation), &err)
                .with_session(envelope.session_id.clone()),
        }
    }

    /// Answer a JSON request document; never fails, errors become `ok: false`
    pub fn handle_json(&self, text: &str) -> Response {
        match Envelope::parse(text) {
            Ok(envelope) => self.respond(&envelope),
            Err((operation, session_id, err)) => {
                Response::failure(operation, &err).with_session(session_id)
            }
        }
    }

    /// Answer a JSON request value
    pub fn handle_value(&self, value: Value) -> Response {
        self.handle_json(&value.to_string())
    }
}
