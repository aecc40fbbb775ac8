//! Configuration for AgentBTO
//!
//! - XDG-compliant path resolution
//! - Persisted settings, including the loan policy

pub mod paths;
pub mod settings;

pub use paths::AgentPaths;
pub use settings::Settings;
