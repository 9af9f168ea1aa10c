//! Document format detection and parsing (JSON or TOML).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from the file extension (`.json` or `.toml`).
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(anyhow!(
                "unsupported document extension for {} (expected .json or .toml)",
                path.display()
            )),
        }
    }
}

/// Read a document into a JSON value, whatever its on-disk format.
pub fn read_value(path: &Path) -> Result<Value> {
    let format = DocumentFormat::from_path(path)?;
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))
        }
        DocumentFormat::Toml => {
            toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))
        }
    }
}

/// Serialize `value` in the format implied by `path`, with trailing newline.
pub fn write_value<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut payload = match DocumentFormat::from_path(path)? {
        DocumentFormat::Json => serde_json::to_string_pretty(value).context("serialize json")?,
        DocumentFormat::Toml => toml::to_string_pretty(value).context("serialize toml")?,
    };
    payload.push('\n');
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_extension_is_rejected() {
        let err = DocumentFormat::from_path(Path::new("graph.yaml")).expect_err("yaml");
        assert!(err.to_string().contains("unsupported document extension"));
    }

    #[test]
    fn toml_and_json_parse_to_same_value() {
        let temp = tempfile::tempdir().expect("tempdir");
        let json_path = temp.path().join("goal.json");
        let toml_path = temp.path().join("goal.toml");
        fs::write(&json_path, r#"{"target_node_id": "Goal", "policy_tier_max": 2}"#)
            .expect("write json");
        fs::write(&toml_path, "target_node_id = \"Goal\"\npolicy_tier_max = 2\n")
            .expect("write toml");

        let expected = json!({"target_node_id": "Goal", "policy_tier_max": 2});
        assert_eq!(read_value(&json_path).expect("json"), expected);
        assert_eq!(read_value(&toml_path).expect("toml"), expected);
    }
}
