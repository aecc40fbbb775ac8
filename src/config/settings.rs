//! User settings for AgentBTO
//!
//! Loan policy defaults, output preferences and audit switch, stored as
//! `config.json` in the base directory.

use serde::{Deserialize, Serialize};

use super::paths::AgentPaths;
use crate::error::AgentError;
use crate::export::OutputFormat;
use crate::models::LoanPolicy;

/// User settings for AgentBTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Rate, tenure, income ratio and OA retention applied when a request
    /// leaves them out
    #[serde(default)]
    pub loan_policy: LoanPolicy,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Append every evaluation to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    #[serde(default)]
    pub default_format: OutputFormat,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            loan_policy: LoanPolicy::default(),
            currency_symbol: default_currency(),
            audit_enabled: default_audit_enabled(),
            default_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &AgentPaths) -> Result<Self, AgentError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until `init`
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| AgentError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| AgentError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, paths: &AgentPaths) -> Result<(), AgentError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AgentError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| AgentError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), AgentError> {
        self.loan_policy.validate()?;
        if self.currency_symbol.trim().is_empty() {
            return Err(AgentError::Config("currency_symbol must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.loan_policy.income_ratio, 0.30);
        assert_eq!(settings.currency_symbol, "$");
        assert!(settings.audit_enabled);
        assert_eq!(settings.default_format, OutputFormat::Text);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AgentPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.loan_policy.tenure_years = 20;
        settings.loan_policy.retain_oa_amount = Money::from_dollars(10_000);
        settings.default_format = OutputFormat::Json;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AgentPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"loan_policy": {"annual_rate": 0.026}, "audit_enabled": false}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.loan_policy.annual_rate, 0.026);
        assert_eq!(loaded.loan_policy.tenure_years, 25);
        assert!(!loaded.audit_enabled);
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AgentPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"loan_policy": {"annual_rate": 3.0}}"#).unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(AgentError::Config(_))
        ));
    }
}
