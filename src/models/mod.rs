//! Core data models for AgentBTO
//!
//! Typed budget, listing and estimate structures, plus the raw request
//! shapes they are validated from.

pub mod affordability;
pub mod budget;
pub mod estimate;
pub mod ids;
pub mod money;
pub mod policy;
pub mod raw;

pub use affordability::{
    AffordabilityResult, AffordabilityStatus, ListingEntry, ListingFailure, ListingInput,
    ListingOutcome, ListingPrice,
};
pub use budget::{BudgetInput, BudgetRequest, BudgetResult, LoanEvaluation};
pub use estimate::{
    Confidence, EstimateAssessment, EstimateEntry, EstimateFailure, EstimateInput,
    EstimateOutcome, PriceEstimate,
};
pub use ids::{RequestId, SessionId};
pub use money::Money;
pub use policy::LoanPolicy;
pub use raw::RawValue;
