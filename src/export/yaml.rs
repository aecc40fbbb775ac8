//! YAML output

use std::io::Write;

use serde::Serialize;

use crate::error::{AgentError, AgentResult};

/// Write any serializable value as a YAML document
pub fn write_yaml<T: Serialize, W: Write>(value: &T, writer: &mut W) -> AgentResult<()> {
    serde_yaml::to_writer(writer, value).map_err(|e| AgentError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_yaml() {
        let mut buffer = Vec::new();
        write_yaml(
            &json!({"ok": true, "calculation": {"total_budget": 619365}}),
            &mut buffer,
        )
        .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("ok: true"));
        assert!(output.contains("total_budget: 619365"));

        let parsed: serde_json::Value = serde_yaml::from_str(&output).unwrap();
        assert_eq!(parsed["calculation"]["total_budget"], 619365);
    }
}
