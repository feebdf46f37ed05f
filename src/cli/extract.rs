//! Extract command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::info;

use crate::config::CliOverrides;
use crate::extract::segment;
use crate::manifest::{Manifest, DEFAULT_MANIFEST_NAME};
use crate::output::{write_all, DirectorySink};
use crate::source::load_sheet;

use super::{resolve_config, SegmentArgs, DEFAULT_OUTPUT_DIR, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the extract command
pub fn run_extract(
    input: &Path,
    output: Option<&Path>,
    prefix: Option<&str>,
    manifest: bool,
    manifest_path: Option<&Path>,
    dry_run: bool,
    args: &SegmentArgs,
) -> ExitCode {
    let overrides = CliOverrides {
        threshold: args.threshold,
        connectivity: args.connectivity,
        out: output.map(Path::to_path_buf),
        prefix: prefix.map(String::from),
        manifest: (manifest || manifest_path.is_some()).then_some(true),
    };
    let loaded = match resolve_config(args.config.as_deref(), &overrides) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let config = loaded.config.extract_config();
    let prefix = loaded.config.output.prefix.as_str();

    // Default: icons_detected/ beside the sheet
    let out_dir = loaded.output_dir().unwrap_or_else(|| {
        input.parent().unwrap_or(Path::new("")).join(DEFAULT_OUTPUT_DIR)
    });

    let sheet = match load_sheet(input) {
        Ok(sheet) => sheet,
        Err(e) => {
            eprintln!("Error: Failed to load '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let segmentation = match segment(&sheet, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    println!("Detected {} sprites", segmentation.components);

    let manifest_path: Option<PathBuf> = loaded.config.output.manifest.then(|| {
        manifest_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| out_dir.join(DEFAULT_MANIFEST_NAME))
    });

    if dry_run {
        println!("Dry run: would write {} files to {}", segmentation.regions.len(), out_dir.display());
        if let Some(ref path) = manifest_path {
            println!("Dry run: would write manifest to {}", path.display());
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    let mut sink = match DirectorySink::create(&out_dir, prefix) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("Error: Failed to create '{}': {}", out_dir.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let written = match write_all(segmentation.sprites(&sheet), &mut sink) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Error: Failed to write sprites to '{}': {}", out_dir.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    debug_assert_eq!(written, segmentation.components as usize);
    info!(written, dir = %sink.dir().display(), "wrote sprites");

    if let Some(path) = manifest_path {
        let image_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let manifest = Manifest::new(image_name, &segmentation, &config, prefix);
        if let Err(e) = manifest.write(&path) {
            eprintln!("Error: Failed to write manifest '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        info!(path = %path.display(), "wrote manifest");
    }

    println!("Done!");
    ExitCode::from(EXIT_SUCCESS)
}
