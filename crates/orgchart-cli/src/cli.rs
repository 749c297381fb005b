//! Command-line interface for the orgchart utility
//!
//! Reads a JSON array of entity records and writes the computed layout as JSON.

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;

use orgchart::core::logging::init_logging;
use orgchart::prelude::*;

/// Orgchart - Compute tree layouts for reporting hierarchies
#[derive(Parser)]
#[command(name = "orgchart")]
#[command(about = "Compute banded top-down layouts for organization charts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lay out a JSON list of entities
    Layout {
        /// Input file with a JSON array of entities (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the layout JSON (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file with `spacing` and `connectors` sections
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        spacing: SpacingArgs,

        /// Write single-line JSON
        #[arg(long)]
        compact: bool,

        /// Fail if any entity or connection was dropped
        #[arg(long)]
        strict: bool,
    },

    /// Check entity input and report every problem found
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// JSON file with `spacing` and `connectors` sections
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Spacing overrides; each one replaces the config file value
#[derive(clap::Args, Debug, Default, Clone, Copy, PartialEq)]
pub struct SpacingArgs {
    /// Box width
    #[arg(long)]
    pub box_width: Option<f64>,

    /// Box height
    #[arg(long)]
    pub box_height: Option<f64>,

    /// Horizontal gap between boxes
    #[arg(long)]
    pub horizontal_spacing: Option<f64>,

    /// Vertical gap between bands
    #[arg(long)]
    pub vertical_spacing: Option<f64>,

    /// Margin around the chart
    #[arg(long)]
    pub margin: Option<f64>,
}

impl SpacingArgs {
    fn apply(&self, spacing: &mut SpacingConfig) {
        let overrides = [
            (self.box_width, &mut spacing.box_width),
            (self.box_height, &mut spacing.box_height),
            (self.horizontal_spacing, &mut spacing.horizontal_spacing),
            (self.vertical_spacing, &mut spacing.vertical_spacing),
            (self.margin, &mut spacing.margin),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

/// Layout settings file
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub spacing: SpacingConfig,
    pub connectors: ConnectorConfig,
}

/// Result of the validate command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub valid: bool,
    pub entity_count: usize,
    pub placed_count: usize,
    pub connection_count: usize,
    pub warnings: Vec<LayoutWarning>,
}

/// Main CLI application
#[derive(Default)]
pub struct OrgChartApp {
    config: ChartConfig,
}

impl OrgChartApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over the flags
        let log_level_str = std::env::var("ORGCHART_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("ORGCHART_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Orgchart v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Layout {
                input,
                output,
                config,
                spacing,
                compact,
                strict,
            } => {
                let config = self.resolve_config(config, &spacing)?;
                let rendered = self.layout_command(input, &config, compact, strict, cli.verbose)?;
                self.write_output(output, &rendered)
            }
            Commands::Validate {
                input,
                config,
                json,
            } => {
                let config = self.resolve_config(config, &SpacingArgs::default())?;
                let summary = self.validate_command(input, &config, cli.verbose)?;
                self.print_summary(&summary, json)?;
                if summary.valid {
                    Ok(())
                } else {
                    Err(anyhow!("No valid entities in input"))
                }
            }
        }
    }

    /// Start from the app config, then the config file, then the flags
    fn resolve_config(&self, path: Option<PathBuf>, spacing: &SpacingArgs) -> Result<ChartConfig> {
        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(&path).map_err(|e| {
                    anyhow!("Failed to read config file '{}': {}", path.display(), e)
                })?;
                serde_json::from_str(&content).map_err(|e| {
                    anyhow!("Invalid config file '{}': {}", path.display(), e)
                })?
            }
            None => self.config.clone(),
        };
        spacing.apply(&mut config.spacing);
        Ok(config)
    }

    /// Handle the layout command, returning the serialized layout
    fn layout_command(
        &self,
        input: Option<PathBuf>,
        config: &ChartConfig,
        compact: bool,
        strict: bool,
        verbose: bool,
    ) -> Result<String> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let database = OrgDatabase::from_json(&content)?;
        let algorithm = OrgChartLayoutAlgorithm::with_config(config.spacing)
            .with_connectors(config.connectors);
        let result = algorithm.compute(&database)?;

        for warning in &result.warnings {
            eprintln!("warning: {}", warning);
        }
        if strict && result.has_warnings() {
            bail!(
                "{} warning(s) reported and --strict is set",
                result.warnings.len()
            );
        }

        if verbose {
            eprintln!(
                "Placed {} nodes with {} connections",
                result.nodes.len(),
                result.connections.len()
            );
        }
        info!(node_count = result.nodes.len(), "Writing layout");

        let rendered = if compact {
            serde_json::to_string(&result)?
        } else {
            serde_json::to_string_pretty(&result)?
        };
        Ok(rendered)
    }

    /// Handle the validate command
    ///
    /// Only unreadable input is an error here; an input with no valid entity
    /// yields a summary with `valid: false`.
    fn validate_command(
        &self,
        input: Option<PathBuf>,
        config: &ChartConfig,
        verbose: bool,
    ) -> Result<ValidationSummary> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let database = OrgDatabase::from_json(&content)?;
        let entity_count = database.entities().len() + database.warnings().len();
        let algorithm = OrgChartLayoutAlgorithm::with_config(config.spacing)
            .with_connectors(config.connectors);

        let summary = match algorithm.compute(&database) {
            Ok(result) => ValidationSummary {
                valid: true,
                entity_count,
                placed_count: result.nodes.len(),
                connection_count: result.connections.len(),
                warnings: result.warnings,
            },
            Err(OrgChartError::EmptyInput { warnings }) => ValidationSummary {
                valid: false,
                entity_count,
                placed_count: 0,
                connection_count: 0,
                warnings,
            },
            Err(e) => return Err(e.into()),
        };
        Ok(summary)
    }

    fn print_summary(&self, summary: &ValidationSummary, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(summary)?);
            return Ok(());
        }

        if summary.valid {
            println!(
                "✓ {} of {} entities placed, {} connections",
                summary.placed_count, summary.entity_count, summary.connection_count
            );
        } else {
            println!("✗ No valid entities ({} records)", summary.entity_count);
        }
        for warning in &summary.warnings {
            println!("  - {}", warning);
        }
        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                if content.is_empty() || content.ends_with('\n') {
                    write!(stdout, "{}", content)?;
                } else {
                    writeln!(stdout, "{}", content)?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
