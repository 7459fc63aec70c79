//! Configuration management for the distiller.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `distill.toml` file
//! 3. User config `~/.config/distill/config.toml`
//! 4. Built-in defaults (lowest priority)

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comment pre-pass configuration.
    pub comments: CommentConfig,

    /// Comment-to-code association configuration.
    pub association: AssociationConfig,

    /// Change classification configuration.
    pub classification: ClassificationConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./distill.toml` (project local)
    /// 2. `~/.config/distill/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_file(DEFAULT_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(DEFAULT_CONFIG_DIR).join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("DISTILL_MERGE_LINE_COMMENTS") {
            if let Ok(b) = value.parse() {
                self.comments.merge_line_comments = b;
            }
        }
        if let Ok(value) = std::env::var("DISTILL_DROP_COMMENTED_CODE") {
            if let Ok(b) = value.parse() {
                self.comments.drop_commented_code = b;
            }
        }
        if let Ok(value) = std::env::var("DISTILL_ADJACENT_RATING") {
            if let Ok(n) = value.parse() {
                self.association.adjacent_rating = n;
            }
        }
        if let Ok(value) = std::env::var("DISTILL_LINE_BREAK_RATING") {
            if let Ok(n) = value.parse() {
                self.association.line_break_rating = n;
            }
        }
        if let Ok(name) = std::env::var("DISTILL_VOID_TYPE_NAME") {
            self.classification.void_type_name = name;
        }
    }

    /// Check values that deserialize fine but cannot work together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.association.line_break_rating >= self.association.adjacent_rating {
            return Err(ConfigError::Invalid(format!(
                "line_break_rating ({}) must be lower than adjacent_rating ({})",
                self.association.line_break_rating, self.association.adjacent_rating
            )));
        }
        if self.classification.void_type_name.trim().is_empty() {
            return Err(ConfigError::Invalid("void_type_name must not be empty".to_string()));
        }
        for pattern in &self.comments.extra_code_patterns {
            Regex::new(pattern)
                .map_err(|e| ConfigError::Invalid(format!("bad code pattern '{}': {}", pattern, e)))?;
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Comment pre-pass configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentConfig {
    /// Merge consecutive line comments separated only by whitespace.
    pub merge_line_comments: bool,

    /// Drop comments that look like commented-out code.
    pub drop_commented_code: bool,

    /// Comments containing this marker are never merged.
    pub translator_marker: String,

    /// Additional regexes that identify commented-out code.
    pub extra_code_patterns: Vec<String>,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            merge_line_comments: DEFAULT_MERGE_LINE_COMMENTS,
            drop_commented_code: DEFAULT_DROP_COMMENTED_CODE,
            translator_marker: DEFAULT_TRANSLATOR_MARKER.to_string(),
            extra_code_patterns: Vec::new(),
        }
    }
}

/// Comment-to-code association configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociationConfig {
    /// Proximity rating for code on the same line, separated only by spaces.
    pub adjacent_rating: u32,

    /// Proximity rating for code exactly one line break away.
    pub line_break_rating: u32,

    /// Attach to the following code when proximity and word overlap tie.
    pub prefer_succeeding: bool,
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            adjacent_rating: DEFAULT_ADJACENT_RATING,
            line_break_rating: DEFAULT_LINE_BREAK_RATING,
            prefer_succeeding: DEFAULT_PREFER_SUCCEEDING,
        }
    }
}

/// Change classification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Return type name meaning "no return value".
    pub void_type_name: String,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            void_type_name: DEFAULT_VOID_TYPE_NAME.to_string(),
        }
    }
}

impl ClassificationConfig {
    /// True if a type name denotes the empty return type.
    ///
    /// The configured name must be the whole name or its last token, after a
    /// `.` or whitespace, so `java.lang.void` matches but `Avoid` does not.
    pub fn is_void(&self, type_name: &str) -> bool {
        let void = self.void_type_name.trim();
        match type_name.trim().strip_suffix(void) {
            Some("") => true,
            Some(prefix) => prefix.ends_with(|c: char| c == '.' || c.is_whitespace()),
            None => false,
        }
    }
}
