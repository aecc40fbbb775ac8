//! AgentBTO - HDB loan, budget and BTO affordability calculator
//!
//! This library provides the financial core of the AgentBTO housing
//! assistant: it turns household income and savings into a maximum HDB loan
//! and total purchasing budget, and compares that budget against flat
//! prices and cost estimates.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Money, budget, listing and estimate types
//! - `services`: Loan math, budget and affordability calculations
//! - `request`: JSON request validation and the response envelope
//! - `config`: Configuration and path management
//! - `audit`: Audit log of answered requests
//! - `display` / `export`: Text, JSON, YAML and CSV output
//! - `cli`: Command handlers for the `agentbto` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use agentbto::models::{BudgetInput, Money};
//! use agentbto::services::compute_budget;
//!
//! let input = BudgetInput::new(
//!     Money::from_dollars(9_000),
//!     Money::from_dollars(50_000),
//!     Money::from_dollars(120_000),
//! );
//! let result = compute_budget(&input).unwrap();
//! assert_eq!(result.cpf_used_in_budget, Money::from_dollars(100_000));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod request;
pub mod services;

pub use error::{AgentError, AgentResult};
