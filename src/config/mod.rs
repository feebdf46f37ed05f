//! Configuration module for spritecut
//!
//! Provides types and parsing for `spritecut.toml`.

pub mod loader;
pub mod schema;

pub use loader::{load_config, merge_cli_overrides, CliOverrides, ConfigError, LoadedConfig};
pub use schema::*;
