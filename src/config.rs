//! TOML configuration for the reader.
//!
//! Reconciliation settings can be put in a config file instead of code:
//!
//! ```toml
//! # petrdf.toml
//! [reader]
//! tolerance = 0.1
//! default_doi_mm = 0.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default tolerance beyond which a measured scanner value overrides the catalog
pub const DEFAULT_TOLERANCE: f32 = 0.1;

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Root configuration structure for petrdf.toml files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Reader settings.
    #[serde(default)]
    pub reader: ReaderConfig,
}

/// Settings used while resolving the scanner model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Largest catalog/measured difference that keeps the catalog value.
    pub tolerance: f32,

    /// Average depth of interaction (mm) used when the ring radius is overridden.
    pub default_doi_mm: f32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            default_doi_mm: 0.0,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [reader]
            tolerance = 0.5
            default_doi_mm = 9.4
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.reader.tolerance, 0.5);
        assert_eq!(config.reader.default_doi_mm, 9.4);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [reader]
            default_doi_mm = 7.0
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.reader.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(config.reader.default_doi_mm, 7.0);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.reader, ReaderConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::from_str("[reader]\ntolerance = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }
}
