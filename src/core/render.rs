//! Renderer module
//!
//! Renders a CopyReport to different output formats: summary, json, jsonl

use colored::Colorize;
use std::fmt::Write as _;

use crate::core::model::CopyReport;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" | "text" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for copy reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a report to a string
    pub fn render(&self, report: &CopyReport) -> String {
        match self.config.format {
            OutputFormat::Summary => self.render_summary(report),
            OutputFormat::Json => self.render_json(report),
            OutputFormat::Jsonl => self.render_jsonl(report),
        }
    }

    /// Render as JSON Lines (one file record per line)
    fn render_jsonl(&self, report: &CopyReport) -> String {
        report
            .files
            .iter()
            .filter_map(|record| {
                if self.config.pretty {
                    serde_json::to_string_pretty(record).ok()
                } else {
                    serde_json::to_string(record).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render the whole report as a single JSON object
    fn render_json(&self, report: &CopyReport) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
        }
    }

    /// Render a short human-readable summary
    fn render_summary(&self, report: &CopyReport) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "{} {} {} {}",
            "Copied".green().bold(),
            report.source_name.bold(),
            "->".dimmed(),
            report.target_name.bold()
        );
        let _ = writeln!(output, "  from: {}", report.source_root);
        let _ = writeln!(output, "  to:   {}", report.target_root);
        let _ = writeln!(
            output,
            "  files: {} ({} bytes), renamed: {}, path rewrites: {}",
            report.len(),
            report.total_bytes(),
            report.renamed_count(),
            report.total_path_rewrites()
        );
        if report.is_empty() {
            let _ = writeln!(output, "  {}", "no files copied".yellow());
        }

        if !report.excluded_dirs.is_empty() {
            let _ = writeln!(output, "  {}", "excluded:".yellow());
            for dir in &report.excluded_dirs {
                let _ = writeln!(output, "    {}/", dir);
            }
        }

        if !report.skipped.is_empty() {
            let _ = writeln!(output, "  {}", "skipped:".yellow());
            for entry in &report.skipped {
                let _ = writeln!(output, "    {}", entry);
            }
        }

        output.trim_end().to_string()
    }
}
