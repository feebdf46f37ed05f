//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod extract;
mod regions;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, LoadedConfig};
use crate::labeling::Connectivity;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Directory name used when neither `-o` nor the config names one.
pub const DEFAULT_OUTPUT_DIR: &str = "icons_detected";

/// Spritecut - Split a sprite sheet into one PNG per sprite
#[derive(Parser)]
#[command(name = "spritecut")]
#[command(about = "Spritecut - Detect sprites on a dark sheet background and save each as a PNG")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Segmentation flags shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct SegmentArgs {
    /// Channel threshold (0-255): a pixel is sprite content if R, G or B exceeds it [default: 20]
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Pixel adjacency used to join sprite pixels [default: eight]
    #[arg(long, value_enum)]
    pub connectivity: Option<Connectivity>,

    /// Config file (default: nearest spritecut.toml upward from the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract every sprite of a sheet into its own PNG
    Extract {
        /// Sprite sheet image
        input: PathBuf,

        /// Output directory (default: icons_detected/ next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name prefix; files are named {prefix}{index}.png [default: icon_]
        #[arg(long)]
        prefix: Option<String>,

        /// Also write a JSON manifest to <output>/sprites.json
        #[arg(long)]
        manifest: bool,

        /// Write the JSON manifest to this path instead (implies --manifest)
        #[arg(long)]
        manifest_path: Option<PathBuf>,

        /// Detect and report without writing files
        #[arg(long, conflicts_with_all = ["manifest", "manifest_path"])]
        dry_run: bool,

        #[command(flatten)]
        segment: SegmentArgs,
    },
    /// List detected sprite regions without writing anything
    Regions {
        /// Sprite sheet image
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        segment: SegmentArgs,
    },
}

/// Install the stderr log subscriber.
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // Ignore failure: a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load config and fold CLI flags over it. Prints the error and returns the
/// exit code on failure.
pub(crate) fn resolve_config(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<LoadedConfig, ExitCode> {
    let mut loaded = match load_config(config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };
    if let Err(e) = merge_cli_overrides(&mut loaded, overrides) {
        eprintln!("Error: {}", e);
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    if let Some(ref path) = loaded.path {
        tracing::debug!(path = %path.display(), "using config file");
    }
    Ok(loaded)
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Extract { input, output, prefix, manifest, manifest_path, dry_run, segment } => {
            extract::run_extract(
                &input,
                output.as_deref(),
                prefix.as_deref(),
                manifest,
                manifest_path.as_deref(),
                dry_run,
                &segment,
            )
        }
        Commands::Regions { input, json, segment } => {
            regions::run_regions(&input, json, &segment)
        }
    }
}
