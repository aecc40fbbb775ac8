//! Cost estimate models
//!
//! The cost estimation service returns a point estimate with an optional
//! 95% confidence interval. Keys arrive in camelCase from the web client and
//! in snake_case from the estimator itself; both are accepted.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::affordability::AffordabilityStatus;
use super::money::Money;
use super::raw::{json_kind, optional, require, RawValue};
use crate::error::{AgentError, AgentResult};

/// An estimate as received, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateInput {
    #[serde(default, alias = "estimated_price", skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<RawValue>,
    #[serde(default, alias = "ci_lower", skip_serializing_if = "Option::is_none")]
    pub ci_lower: Option<RawValue>,
    #[serde(default, alias = "ci_upper", skip_serializing_if = "Option::is_none")]
    pub ci_upper: Option<RawValue>,
    #[serde(default, alias = "project_location", skip_serializing_if = "Option::is_none")]
    pub project_location: Option<String>,
    #[serde(default, alias = "flat_type", skip_serializing_if = "Option::is_none")]
    pub flat_type: Option<String>,
}

impl EstimateInput {
    /// Validate into a typed estimate
    pub fn resolve(&self) -> AgentResult<PriceEstimate> {
        let estimated_price =
            require(&self.estimated_price, "estimatedPrice")?.to_money("estimatedPrice")?;
        let ci_lower = optional(&self.ci_lower)
            .map(|v| v.to_money("ciLower"))
            .transpose()?;
        let ci_upper = optional(&self.ci_upper)
            .map(|v| v.to_money("ciUpper"))
            .transpose()?;

        if let (Some(lo), Some(hi)) = (ci_lower, ci_upper) {
            if lo > hi {
                return Err(AgentError::invalid(
                    "ciLower",
                    format!("lower bound {} exceeds upper bound {}", lo, hi),
                ));
            }
        }

        Ok(PriceEstimate {
            estimated_price,
            ci_lower,
            ci_upper,
            project_location: self.project_location.clone(),
            flat_type: self.flat_type.clone(),
        })
    }
}

/// One value of an estimate batch, kept even when it is not an estimate object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EstimateEntry {
    Estimate(EstimateInput),
    Malformed(serde_json::Value),
}

impl EstimateEntry {
    pub fn resolve(&self) -> AgentResult<PriceEstimate> {
        match self {
            Self::Estimate(input) => input.resolve(),
            Self::Malformed(value) => Err(malformed_estimate(value)),
        }
    }
}

impl From<EstimateInput> for EstimateEntry {
    fn from(input: EstimateInput) -> Self {
        Self::Estimate(input)
    }
}

fn malformed_estimate(value: &serde_json::Value) -> AgentError {
    let text_fields = ["projectLocation", "project_location", "flatType", "flat_type"];
    for key in text_fields {
        if let Some(v) = value.get(key).filter(|v| !v.is_string() && !v.is_null()) {
            return AgentError::invalid(key, format!("expected a string, got {}", json_kind(v)));
        }
    }
    AgentError::invalid(
        "estimate",
        format!("expected an object with an estimatedPrice, got {}", json_kind(value)),
    )
}

/// A validated price estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub estimated_price: Money,
    pub ci_lower: Option<Money>,
    pub ci_upper: Option<Money>,
    pub project_location: Option<String>,
    pub flat_type: Option<String>,
}

impl PriceEstimate {
    pub fn new(estimated_price: Money) -> Self {
        Self {
            estimated_price,
            ci_lower: None,
            ci_upper: None,
            project_location: None,
            flat_type: None,
        }
    }

    pub fn with_interval(mut self, lower: Option<Money>, upper: Option<Money>) -> Self {
        self.ci_lower = lower;
        self.ci_upper = upper;
        self
    }
}

/// How confident the verdict is, given the estimate's interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    LikelyAffordable,
    LikelyUnaffordable,
    Borderline,
    Unknown,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LikelyAffordable => write!(f, "likely affordable"),
            Self::LikelyUnaffordable => write!(f, "likely unaffordable"),
            Self::Borderline => write!(f, "borderline"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Budget judged against one estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimateAssessment {
    pub affordability_status: AffordabilityStatus,
    pub shortfall: Money,
    /// Budget minus estimated price; negative when the estimate is out of reach
    pub margin_vs_estimate: Money,
    pub confidence: Confidence,
    pub explanation: String,
}

/// An estimate that could not be judged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimateFailure {
    pub affordability_status: &'static str,
    pub confidence: Confidence,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl EstimateFailure {
    pub fn from_error(err: &AgentError) -> Self {
        Self {
            affordability_status: "error",
            confidence: Confidence::Unknown,
            error: err.to_string(),
            field: err.field().map(str::to_string),
        }
    }
}

/// Outcome for one estimate in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EstimateOutcome {
    Assessed(EstimateAssessment),
    Failed(EstimateFailure),
}

impl EstimateOutcome {
    pub fn assessment(&self) -> Option<&EstimateAssessment> {
        match self {
            Self::Assessed(a) => Some(a),
            Self::Failed(_) => None,
        }
    }
}
