//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::core::config::CopyConfig;
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::engine::copier::TreeCopier;

/// copyproj - copy a project directory under a new name.
#[derive(Parser, Debug)]
#[command(name = "copyproj")]
#[command(
    author,
    version,
    about,
    arg_required_else_help = true,
    long_about = r#"Copy a project directory to a new location under a new name.

The project name is the last segment of each path. Every file is copied with:
- the source project name replaced by the target name in its file name
- the source project name (and its UPPER-CASE form) replaced in its contents
- the first relative path like ../../inc on each line made absolute, so the
  copy still builds when it does not sit at the same depth as the original

Build output directories (_Resharper, Intermediate, Output,
_UpgradeReport_Files, ipch) are not copied. Existing files are never
overwritten: the run stops at the first destination file that already exists.

Examples:
    copyproj ../Proj ../NewProj
    copyproj NewProj                  # copy the current directory
    copyproj -r Proj /tmp/Scratch     # keep relative paths as they are
"#
)]
pub struct Cli {
    /// Source project directory (optional, defaults to the current
    /// directory) followed by the directory to create.
    #[arg(value_name = "PATH", num_args = 1..=2, required = true)]
    pub paths: Vec<PathBuf>,

    /// Do not rewrite relative paths to absolute ones.
    #[arg(
        short = 'r',
        long,
        long_help = "Do not rewrite relative paths to absolute ones.\n\n\
Without path rewriting, place the copy at the same relative depth as the\n\
source, or make sure everything it refers to exists next to it."
    )]
    pub no_fix_relative: bool,

    /// Additional directory prefix to exclude (repeatable).
    #[arg(
        short = 'x',
        long = "exclude",
        value_name = "PREFIX",
        long_help = "Exclude directories whose path relative to SOURCE starts with PREFIX\n\
(case-insensitive). May be given more than once.\n\n\
Example: --exclude Debug --exclude GUI/Output"
    )]
    pub exclude: Vec<String>,

    /// Do not apply the built-in exclusion prefixes.
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Additional file suffix exempt from path rewriting (repeatable).
    #[arg(
        long = "no-path-ext",
        value_name = "SUFFIX",
        long_help = "Files ending with SUFFIX (case-insensitive) still get project name\n\
substitution but no relative path rewriting. Added to the defaults\n\
(.PNG, .TGA, .DAE). May be given more than once."
    )]
    pub no_path_ext: Vec<String>,

    /// Keep $(ProjectDir) tokens instead of stripping them before path rewriting.
    #[arg(long)]
    pub keep_project_dir_token: bool,

    /// Report format (summary/json/jsonl).
    #[arg(
        long,
        default_value = "summary",
        value_parser = ["summary", "json", "jsonl"],
        value_name = "FORMAT",
        long_help = "Select the format of the report printed after a successful copy.\n\n\
Supported values:\n\
- summary (default): short human-readable summary\n\
- json: the whole report as one JSON object\n\
- jsonl: one JSON object per copied file"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (no report, errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (log every copied file to stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Split positional paths into (source, target). A single path is the
    /// target and the current directory is the source.
    pub fn source_and_target(&self) -> Result<(PathBuf, PathBuf)> {
        match self.paths.as_slice() {
            [target] => {
                let source =
                    std::env::current_dir().context("cannot determine current directory")?;
                Ok((source, target.clone()))
            }
            [source, target] => Ok((source.clone(), target.clone())),
            _ => anyhow::bail!("expected [SOURCE] TARGET"),
        }
    }

    /// Build the engine configuration from the flags
    pub fn copy_config(&self) -> CopyConfig {
        let config = if self.no_default_excludes {
            CopyConfig::default().with_exclude_prefixes(Vec::<String>::new())
        } else {
            CopyConfig::default()
        };

        config
            .extend_exclude_prefixes(self.exclude.iter().cloned())
            .extend_no_path_rewrite(self.no_path_ext.iter().cloned())
            .with_fix_relative(!self.no_fix_relative)
            .with_strip_project_dir_token(!self.keep_project_dir_token)
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    let (source, target) = cli.source_and_target()?;
    let copier = TreeCopier::new(cli.copy_config());
    let report = copier.copy_tree(&source, &target).with_context(|| {
        format!(
            "failed to copy {} to {}",
            source.display(),
            target.display()
        )
    })?;

    if !cli.quiet {
        println!("{}", Renderer::with_config(render_config).render(&report));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("copyproj").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_single_path_is_target() {
        let cli = parse(&["NewProj"]);
        let (source, target) = cli.source_and_target().unwrap();
        assert_eq!(source, std::env::current_dir().unwrap());
        assert_eq!(target, PathBuf::from("NewProj"));
    }

    #[test]
    fn test_two_paths() {
        let cli = parse(&["Proj", "NewProj"]);
        let (source, target) = cli.source_and_target().unwrap();
        assert_eq!(source, PathBuf::from("Proj"));
        assert_eq!(target, PathBuf::from("NewProj"));
    }

    #[test]
    fn test_three_paths_rejected() {
        let result = Cli::try_parse_from(["copyproj", "a", "b", "c"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config() {
        let config = parse(&["a", "b"]).copy_config();
        assert_eq!(config, CopyConfig::default());
    }

    #[test]
    fn test_flags_feed_config() {
        let config = parse(&[
            "-r",
            "--no-default-excludes",
            "-x",
            "Debug",
            "--no-path-ext",
            ".bin",
            "--keep-project-dir-token",
            "a",
            "b",
        ])
        .copy_config();

        assert!(!config.fix_relative);
        assert!(!config.strip_project_dir_token);
        assert_eq!(config.exclude_prefixes, vec!["Debug".to_string()]);
        assert!(config.no_path_rewrite.contains(&".bin".to_string()));
        assert!(!config.is_excluded_dir("Output"));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["copyproj", "-q", "-v", "a", "b"]).is_err());
    }
}
