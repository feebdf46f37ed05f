//! Spritecut - Command-line tool for extracting sprites from a sprite sheet

use std::process::ExitCode;

use spritecut::cli;

fn main() -> ExitCode {
    cli::run()
}
