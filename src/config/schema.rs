//! Configuration schema types for `spritecut.toml`
//!
//! Defines the structure and validation rules for extraction settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::extract::ExtractConfig;
use crate::labeling::Connectivity;
use crate::mask::{ForegroundRule, DEFAULT_THRESHOLD};
use crate::output::DEFAULT_PREFIX;

/// Segmentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractSection {
    /// Channel threshold: any of R, G, B above this marks a pixel as sprite content
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    /// Pixel adjacency rule
    #[serde(default)]
    pub connectivity: Connectivity,
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

impl Default for ExtractSection {
    fn default() -> Self {
        Self { threshold: default_threshold(), connectivity: Connectivity::default() }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Output directory. Relative paths resolve against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// File name prefix for sprites
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Write a JSON manifest next to the sprites
    #[serde(default)]
    pub manifest: bool,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { dir: None, prefix: default_prefix(), manifest: false }
    }
}

/// Complete spritecut.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpritecutConfig {
    #[serde(default)]
    pub extract: ExtractSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "output.prefix")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' {}", self.field, self.message)
    }
}

impl SpritecutConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.output.prefix.is_empty() {
            errors.push(ConfigValidationError {
                field: "output.prefix".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        } else if self.output.prefix.contains(['/', '\\']) {
            errors.push(ConfigValidationError {
                field: "output.prefix".to_string(),
                message: "must not contain path separators".to_string(),
            });
        }

        errors
    }

    /// Pipeline settings for the classifier and labeler.
    pub fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            rule: ForegroundRule::new(self.extract.threshold),
            connectivity: self.extract.connectivity,
        }
    }
}
