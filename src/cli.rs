//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// review-charts - brand review statistics for animated charts
///
/// Reads the cached review dataset, computes population, per-brand and
/// per-month mean scores, and lays out the bar and line charts of the
/// presentation as JSON (or summarizes them as Markdown).
///
/// Examples:
///   review-charts
///   review-charts --input data/formatted.json --output scene.json
///   review-charts --format markdown --output summary.md
///   review-charts --focus-brand Apple --placeholder-label ""
///   review-charts --dry-run
///   review-charts --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Review dataset to read (brand -> product -> [score, date] reviews)
    ///
    /// Defaults to formatted.json, or the [general] input of the config file.
    #[arg(short, long, value_name = "FILE", env = "REVIEW_CHARTS_INPUT")]
    pub input: Option<PathBuf>,

    /// Output file path
    ///
    /// Defaults to presentation.json or presentation.md depending on --format.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "json", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .review-charts.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Chart width in chart-space units
    #[arg(long, value_name = "UNITS")]
    pub width: Option<f64>,

    /// Chart height in chart-space units
    #[arg(long, value_name = "UNITS")]
    pub height: Option<f64>,

    /// Brand whose timeline is introduced first
    #[arg(long, value_name = "BRAND")]
    pub focus_brand: Option<String>,

    /// Display label for the first brand (empty keeps its real name)
    #[arg(long, value_name = "LABEL")]
    pub placeholder_label: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load the dataset, print a summary and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .review-charts.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown summary
    Markdown,
    /// JSON presentation data (default)
    #[default]
    Json,
}

impl OutputFormat {
    /// Output file used when neither the CLI nor the config names one.
    pub fn default_output(&self) -> PathBuf {
        match self {
            OutputFormat::Markdown => PathBuf::from("presentation.md"),
            OutputFormat::Json => PathBuf::from("presentation.json"),
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(width) = self.width {
            if !(width > 0.0) {
                return Err(format!("Width must be positive (got {})", width));
            }
        }
        if let Some(height) = self.height {
            if !(height > 0.0) {
                return Err(format!("Height must be positive (got {})", height));
            }
        }

        if let Some(ref focus) = self.focus_brand {
            if focus.trim().is_empty() {
                return Err("Focus brand must not be empty".to_string());
            }
        }

        // Validate input file if provided
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
            if !input.is_file() {
                return Err(format!("Input path is not a file: {}", input.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is `[general] verbose` from the config file;
    /// `--quiet` always wins over it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn make_args() -> Args {
        Args {
            input: None,
            output: None,
            format: OutputFormat::Json,
            config: None,
            width: None,
            height: None,
            focus_brand: None,
            placeholder_label: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "review-charts",
            "--format",
            "markdown",
            "--width",
            "8",
            "--focus-brand",
            "Apple",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.format, OutputFormat::Markdown);
        assert_eq!(args.width, Some(8.0));
        assert_eq!(args.focus_brand.as_deref(), Some("Apple"));
        assert!(args.verbose);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_default_format_is_json() {
        let args = Args::try_parse_from(["review-charts"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(
            args.format.default_output(),
            PathBuf::from("presentation.json")
        );
        assert_eq!(
            OutputFormat::Markdown.default_output(),
            PathBuf::from("presentation.md")
        );
    }

    #[test]
    fn test_validation_ok() {
        let file = NamedTempFile::new().unwrap();
        let mut args = make_args();
        args.input = Some(file.path().to_path_buf());
        args.width = Some(10.0);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_input() {
        let mut args = make_args();
        args.input = Some(PathBuf::from("/nonexistent/formatted.json"));
        assert!(args.validate().is_err());

        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_dimensions() {
        let mut args = make_args();
        args.width = Some(0.0);
        assert!(args.validate().is_err());

        let mut args = make_args();
        args.height = Some(-2.0);
        assert!(args.validate().is_err());

        let mut args = make_args();
        args.height = Some(f64::NAN);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(false), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(false), tracing::Level::ERROR);
    }

    #[test]
    fn test_log_level_with_config_verbose() {
        let mut args = make_args();
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);
        assert_eq!(args.log_level(false), tracing::Level::INFO);

        args.quiet = true;
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }
}
