//! Output formats for AgentBTO
//!
//! - Text: human-readable tables (see `display`)
//! - JSON: the response envelope, pretty-printed
//! - YAML: the same envelope, for reading by eye
//! - CSV: one row per budget, listing or estimate

pub mod csv;
pub mod json;
pub mod yaml;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use self::csv::write_calculation_csv;
pub use self::json::write_json;
pub use self::yaml::write_yaml;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tables and summaries
    #[default]
    Text,
    /// JSON response envelope
    Json,
    /// YAML response envelope
    Yaml,
    /// Comma-separated rows
    Csv,
}
