//! copyproj - Duplicate a project directory under a new name
//!
//! copyproj provides:
//! - A mirrored copy of the source tree, minus build output directories
//! - Project name substitution in file names and file contents
//! - Relative path rewriting so the copy still builds from any depth

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod engine;
mod logging;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    cli::run(cli)
}
