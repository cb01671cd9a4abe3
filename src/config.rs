//! Runtime configuration
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! [render]
//! terse = false
//!
//! [errors]
//! context_lines = 5
//! read_sources = true
//! default_filename = "Pug"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a runtime configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration shared by the attribute renderer and the error contextualizer
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Render boolean attributes HTML5-style (`disabled` rather than `disabled="disabled"`)
    pub terse: bool,

    /// Lines of source shown around a failing line
    pub context_lines: usize,

    /// Whether the contextualizer may read template files from disk
    pub read_sources: bool,

    /// Name used in error headers when no filename is known
    pub default_filename: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            terse: true,
            context_lines: 3,
            read_sources: true,
            default_filename: "Pug".to_string(),
        }
    }
}

/// TOML structure for deserializing configs
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    render: TomlRender,
    #[serde(default)]
    errors: TomlErrors,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlRender {
    terse: Option<bool>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlErrors {
    context_lines: Option<usize>,
    read_sources: Option<bool>,
    default_filename: Option<String>,
}

impl RuntimeConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        Ok(RuntimeConfig {
            terse: parsed.render.terse.unwrap_or(defaults.terse),
            context_lines: parsed.errors.context_lines.unwrap_or(defaults.context_lines),
            read_sources: parsed.errors.read_sources.unwrap_or(defaults.read_sources),
            default_filename: parsed
                .errors
                .default_filename
                .unwrap_or(defaults.default_filename),
        })
    }

    /// Set terse (HTML5) boolean attributes
    pub fn with_terse(mut self, terse: bool) -> Self {
        self.terse = terse;
        self
    }

    /// Set the number of context lines around a failing line
    pub fn with_context_lines(mut self, lines: usize) -> Self {
        self.context_lines = lines;
        self
    }

    /// Allow or forbid reading template sources from disk
    pub fn with_read_sources(mut self, read: bool) -> Self {
        self.read_sources = read;
        self
    }

    /// Set the name used in error headers when no filename is known
    pub fn with_default_filename(mut self, name: impl Into<String>) -> Self {
        self.default_filename = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert!(config.terse);
        assert_eq!(config.context_lines, 3);
        assert!(config.read_sources);
        assert_eq!(config.default_filename, "Pug");
    }

    #[test]
    fn test_builder_pattern() {
        let config = RuntimeConfig::new()
            .with_terse(false)
            .with_context_lines(1)
            .with_read_sources(false)
            .with_default_filename("inline");

        assert!(!config.terse);
        assert_eq!(config.context_lines, 1);
        assert!(!config.read_sources);
        assert_eq!(config.default_filename, "inline");
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = RuntimeConfig::from_str(
            r#"
[errors]
context_lines = 5
"#,
        )
        .expect("Should parse");
        assert_eq!(config.context_lines, 5);
        assert!(config.terse);
        assert_eq!(config.default_filename, "Pug");
    }

    #[test]
    fn test_parse_full_toml() {
        let config = RuntimeConfig::from_str(
            r#"
[render]
terse = false

[errors]
context_lines = 0
read_sources = false
default_filename = "views"
"#,
        )
        .expect("Should parse");
        assert_eq!(
            config,
            RuntimeConfig::new()
                .with_terse(false)
                .with_context_lines(0)
                .with_read_sources(false)
                .with_default_filename("views")
        );
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(RuntimeConfig::from_str("").unwrap(), RuntimeConfig::default());
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = RuntimeConfig::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = RuntimeConfig::from_str("[render]\npretty = true\n");
        assert!(result.is_err());
    }
}
