//! Renderer module
//!
//! Renders a RunReport to different output formats: jsonl, json, md

use colored::Colorize;
use serde_json::json;
use std::io::Write;

use crate::core::model::{RunReport, UnitOutcome, UnitReport};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
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
    /// Create a new render config with default options
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for run reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a run report to a string
    pub fn render(&self, report: &RunReport) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(report),
            OutputFormat::Json => self.render_json(report),
            OutputFormat::Markdown => self.render_markdown(report),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, report: &RunReport, mut writer: W) -> std::io::Result<()> {
        let output = self.render(report);
        writer.write_all(output.as_bytes())?;
        if !output.is_empty() && !output.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Render as JSON Lines (one unit per line)
    fn render_jsonl(&self, report: &RunReport) -> String {
        report
            .units
            .iter()
            .filter_map(|unit| {
                if self.config.pretty {
                    serde_json::to_string_pretty(unit).ok()
                } else {
                    serde_json::to_string(unit).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON object
    fn render_json(&self, report: &RunReport) -> String {
        let value = json!({
            "units": report.units,
            "manifest": report.manifest,
            "manifest_written": report.manifest_written,
        });
        if self.config.pretty {
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
        } else {
            value.to_string()
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str("## Units\n\n");
        if report.units.is_empty() {
            output.push_str("_No units found._\n");
        } else {
            output.push_str("| name | outcome | destination |\n");
            output.push_str("|------|---------|-------------|\n");
            for unit in &report.units {
                output.push_str(&format!(
                    "| `{}` | {} | `{}` |\n",
                    unit.name,
                    outcome_label(unit.outcome),
                    unit.destination
                ));
            }
        }
        output.push('\n');

        let failures: Vec<&UnitReport> = report
            .units
            .iter()
            .filter(|u| u.outcome.is_failure())
            .collect();
        if !failures.is_empty() {
            output.push_str("## Errors\n\n");
            for unit in failures {
                output.push_str(&format!(
                    "- **{}**: {}\n",
                    unit.name,
                    unit.message.as_deref().unwrap_or("unknown error")
                ));
            }
            output.push('\n');
        }

        output.push_str("## Manifest\n\n");
        output.push_str(&format!("- `{}`", report.manifest));
        if !report.manifest_written {
            output.push_str(&format!(" ({})", "not written".red()));
        }
        output.push('\n');

        output
    }
}

fn outcome_label(outcome: UnitOutcome) -> String {
    let label = outcome.as_str();
    match outcome {
        UnitOutcome::Compiled => label.green().to_string(),
        UnitOutcome::CompileSkipped => label.yellow().to_string(),
        UnitOutcome::CompileFailed | UnitOutcome::CopyFailed => label.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> RunReport {
        let mut report = RunReport {
            manifest: "/dst/metadata.json".to_string(),
            manifest_written: true,
            ..Default::default()
        };
        report.push(UnitReport {
            name: "alpha".to_string(),
            source: "/src/alpha_game".to_string(),
            destination: "/dst/alpha".to_string(),
            outcome: UnitOutcome::CompileSkipped,
            build_file: None,
            message: None,
        });
        report.push(UnitReport {
            name: "beta".to_string(),
            source: "/src/beta_game".to_string(),
            destination: "/dst/beta".to_string(),
            outcome: UnitOutcome::CompileFailed,
            build_file: Some("main.go".to_string()),
            message: Some("exit status: 1".to_string()),
        });
        report
    }

    #[test]
    fn test_render_jsonl() {
        let renderer = Renderer::new(OutputFormat::Jsonl);
        let output = renderer.render(&sample_report());

        assert_eq!(output.lines().count(), 2);
        let first: serde_json::Value = serde_json::from_str(output.lines().next().unwrap()).unwrap();
        assert_eq!(first["name"], "alpha");
        assert_eq!(first["outcome"], "compile-skipped");
    }

    #[test]
    fn test_render_json() {
        let renderer = Renderer::new(OutputFormat::Json);
        let output = renderer.render(&sample_report());

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["units"].as_array().unwrap().len(), 2);
        assert_eq!(value["manifest"], "/dst/metadata.json");
        assert_eq!(value["manifest_written"], true);
    }

    #[test]
    fn test_render_json_pretty() {
        let config = RenderConfig::with_pretty(OutputFormat::Json, true);
        let output = Renderer::with_config(config).render(&sample_report());
        assert!(output.contains("  \"units\""));
    }

    #[test]
    fn test_render_markdown() {
        let renderer = Renderer::new(OutputFormat::Markdown);
        let output = renderer.render(&sample_report());

        assert!(output.contains("## Units"));
        assert!(output.contains("`alpha`"));
        assert!(output.contains("compile-failed"));
        assert!(output.contains("## Errors"));
        assert!(output.contains("**beta**: exit status: 1"));
        assert!(output.contains("`/dst/metadata.json`"));
    }

    #[test]
    fn test_render_markdown_empty() {
        let renderer = Renderer::new(OutputFormat::Markdown);
        let output = renderer.render(&RunReport::default());
        assert!(output.contains("No units found"));
        assert!(!output.contains("## Errors"));
    }

    #[test]
    fn test_render_jsonl_empty() {
        let renderer = Renderer::new(OutputFormat::Jsonl);
        assert!(renderer.render(&RunReport::default()).is_empty());
    }

    #[test]
    fn test_render_to_writer() {
        let renderer = Renderer::new(OutputFormat::Jsonl);
        let mut buffer = Vec::new();
        renderer.render_to(&sample_report(), &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.ends_with('\n'));
        assert!(output.contains("beta"));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!(
            "markdown".parse::<OutputFormat>().unwrap(),
            OutputFormat::Markdown
        );
    }

    #[test]
    fn test_output_format_parse_invalid() {
        let result = "raw".parse::<OutputFormat>();
        assert!(result.unwrap_err().contains("Unknown format"));
    }
}
