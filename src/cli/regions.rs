//! Regions command: report detected sprite boxes without writing files

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use crate::config::CliOverrides;
use crate::extract::segment;
use crate::labeling::Connectivity;
use crate::region::Region;
use crate::source::load_sheet;

use super::{resolve_config, SegmentArgs, EXIT_ERROR, EXIT_SUCCESS};

/// JSON shape of `spritecut regions --json`
#[derive(Serialize)]
struct RegionsReport<'a> {
    size: [u32; 2],
    threshold: u8,
    connectivity: Connectivity,
    count: u32,
    regions: &'a [Region],
}

/// Execute the regions command
pub fn run_regions(input: &Path, json: bool, args: &SegmentArgs) -> ExitCode {
    let overrides = CliOverrides {
        threshold: args.threshold,
        connectivity: args.connectivity,
        ..Default::default()
    };
    let loaded = match resolve_config(args.config.as_deref(), &overrides) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let config = loaded.config.extract_config();

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

    if json {
        let report = RegionsReport {
            size: segmentation.size,
            threshold: config.rule.threshold,
            connectivity: config.connectivity,
            count: segmentation.components,
            regions: &segmentation.regions,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!(
        "{} ({}x{}): {} sprites",
        input.display(),
        segmentation.size[0],
        segmentation.size[1],
        segmentation.components
    );
    for (index, r) in segmentation.regions.iter().enumerate() {
        println!(
            "  {:>4}  x={} y={} w={} h={} area={}",
            index,
            r.x1,
            r.y1,
            r.width(),
            r.height(),
            r.area
        );
    }

    ExitCode::from(EXIT_SUCCESS)
}
