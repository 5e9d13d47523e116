//! Logger settings loaded from JSON
//!
//! ```
//! use rust_event_logger::prelude::*;
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "level": "debug",
//!     "prefix": "billing",
//!     "context": [{ "key": "region", "value": "eu-west-1" }]
//! }"#).unwrap();
//!
//! let logger = LoggerBuilder::from_config(&config).build();
//! assert_eq!(logger.level(), Level::Debug);
//! assert_eq!(logger.prefix(), "billing");
//! ```

use super::error::{LoggerError, Result};
use super::field::Field;
use super::level::Level;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initial level, prefix and context for a logger.
///
/// Missing keys fall back to `Info`, an empty prefix and no context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: Level,
    pub prefix: String,
    pub context: Vec<Field>,
}

impl LoggerConfig {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate settings from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.prefix.chars().any(char::is_control) {
            return Err(LoggerError::config(
                "LoggerConfig",
                "prefix must not contain control characters",
            ));
        }

        if let Some(field) = self.context.iter().find(|f| f.key().is_empty()) {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("context field with value '{}' has an empty key", field.value()),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_for_missing_keys() {
        let config = LoggerConfig::from_json("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.level, Level::Info);
    }

    #[test]
    fn test_full_config() {
        let config = LoggerConfig::from_json(
            r#"{"level":"error","prefix":"svc","context":[{"key":"shard","value":3}]}"#,
        )
        .unwrap();

        assert_eq!(config.level, Level::Error);
        assert_eq!(config.prefix, "svc");
        assert_eq!(config.context[0].value(), &FieldValue::Int(3));
    }

    #[test]
    fn test_unknown_level_rejected() {
        let result = LoggerConfig::from_json(r#"{"level":"verbose"}"#);
        assert!(matches!(result, Err(LoggerError::JsonError(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = LoggerConfig::from_json(r#"{"levle":"info"}"#);
        assert!(matches!(result, Err(LoggerError::JsonError(_))));
    }

    #[test]
    fn test_control_characters_in_prefix_rejected() {
        let result = LoggerConfig::from_json(r#"{"prefix":"svc\nERROR fake"}"#);
        assert!(matches!(
            result,
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_empty_field_key_rejected() {
        let result = LoggerConfig::from_json(r#"{"context":[{"key":"","value":1}]}"#);
        assert!(matches!(
            result,
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, r#"{{"level":"min","prefix":"from-file"}}"#).unwrap();

        let config = LoggerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.level, Level::Min);
        assert_eq!(config.prefix, "from-file");
    }

    #[test]
    fn test_from_missing_file() {
        let result = LoggerConfig::from_file("/nonexistent/logger.json");
        assert!(matches!(result, Err(LoggerError::IoError(_))));
    }
}
