//! Configuration loading and discovery for `spritecut.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::SpritecutConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::labeling::Connectivity;

/// File name searched for during config discovery.
pub const CONFIG_FILE_NAME: &str = "spritecut.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse spritecut.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override channel threshold
    pub threshold: Option<u8>,
    /// Override adjacency rule
    pub connectivity: Option<Connectivity>,
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Override file name prefix
    pub prefix: Option<String>,
    /// Force manifest output on
    pub manifest: Option<bool>,
}

/// A loaded configuration plus the file it came from, if any.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: SpritecutConfig,
    pub path: Option<PathBuf>,
    /// Output directory given on the command line, taken as-is
    pub out_override: Option<PathBuf>,
}

impl LoadedConfig {
    /// Effective output directory: the CLI override, else the config value
    /// resolved against the config file's directory.
    pub fn output_dir(&self) -> Option<PathBuf> {
        if let Some(ref out) = self.out_override {
            return Some(out.clone());
        }
        let dir = self.config.output.dir.as_ref()?;
        match self.path.as_deref().and_then(project_root) {
            Some(root) => Some(resolve_path(root, dir)),
            None => Some(dir.clone()),
        }
    }
}

/// Find spritecut.toml by walking up from the current working directory.
///
/// Checks the current directory first, then each parent in turn, and stops
/// at the filesystem root.
///
/// # Returns
/// - `Some(path)` for the nearest spritecut.toml
/// - `None` if no directory up to the root has one
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find spritecut.toml by walking up from a specific directory.
///
/// Same search as [`find_config`] with an explicit start directory,
/// useful for testing.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Move to parent directory
        if !current.pop() {
            // Reached root, no config found
            return None;
        }
    }
}

/// Load configuration from a spritecut.toml file.
///
/// If a path is provided, loads from that file (a missing file is an error).
/// Otherwise uses [`find_config`] to locate one, falling back to the default
/// configuration when nothing is found.
///
/// # Arguments
/// - `path` - Optional path to a spritecut.toml file
///
/// # Returns
/// - `Ok(LoadedConfig)` with the config and the file it came from, if any
/// - `Err(ConfigError)` if the file cannot be read, parsed, or validated
///
/// # Example
/// ```ignore
/// // Load from discovered config
/// let loaded = load_config(None)?;
///
/// // Load from specific path
/// let loaded = load_config(Some(Path::new("art/spritecut.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            let config = load_config_file(&p)?;
            Ok(LoadedConfig { config, path: Some(p), out_override: None })
        }
        None => Ok(LoadedConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<SpritecutConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SpritecutConfig = toml::from_str(&contents)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &SpritecutConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged
/// result is validated again.
///
/// # Arguments
/// - `loaded` - The configuration to modify
/// - `overrides` - CLI overrides to apply
///
/// # Returns
/// - `Err(ConfigError::Validation)` if an override produced an invalid value
///
/// # Example
/// ```ignore
/// let mut loaded = load_config(None)?;
/// let overrides = CliOverrides {
///     threshold: Some(32),
///     out: Some(PathBuf::from("sprites")),
///     ..Default::default()
/// };
/// merge_cli_overrides(&mut loaded, &overrides)?;
/// ```
pub fn merge_cli_overrides(
    loaded: &mut LoadedConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    let config = &mut loaded.config;

    if let Some(threshold) = overrides.threshold {
        config.extract.threshold = threshold;
    }
    if let Some(connectivity) = overrides.connectivity {
        config.extract.connectivity = connectivity;
    }
    // Relative to the working directory, not the config file
    if let Some(ref out) = overrides.out {
        loaded.out_override = Some(out.clone());
    }
    if let Some(ref prefix) = overrides.prefix {
        config.output.prefix = prefix.clone();
    }
    if let Some(manifest) = overrides.manifest {
        config.output.manifest = manifest;
    }

    validate(&loaded.config)
}

/// Get the project root directory from a config file path.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
