//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.review-charts.toml` files.

use crate::chart::palette::{default_palette, Color};
use crate::chart::ValueRange;
use crate::presentation::{PresentationSettings, StageTitles};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".review-charts.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Chart-space settings.
    #[serde(default)]
    pub chart: ChartConfig,

    /// Brand color settings.
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Stage script settings.
    #[serde(default)]
    pub scene: SceneConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default dataset path.
    #[serde(default = "default_input")]
    pub input: String,

    /// Output file path. Unset picks a name from the output format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: None,
            verbose: false,
        }
    }
}

fn default_input() -> String {
    "formatted.json".to_string()
}

/// Chart-space dimensions and value axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default = "default_height")]
    pub height: f64,

    #[serde(default)]
    pub y_min: f64,

    #[serde(default = "default_y_max")]
    pub y_max: f64,

    #[serde(default = "default_y_step")]
    pub y_step: f64,

    /// Width reserved for labels in the first legend column.
    #[serde(default = "default_legend_column_width")]
    pub legend_column_width: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            y_min: 0.0,
            y_max: default_y_max(),
            y_step: default_y_step(),
            legend_column_width: default_legend_column_width(),
        }
    }
}

fn default_width() -> f64 {
    12.0
}

fn default_height() -> f64 {
    5.0
}

fn default_y_max() -> f64 {
    5.0
}

fn default_y_step() -> f64 {
    1.0
}

fn default_legend_column_width() -> f64 {
    2.0
}

/// Brand palette and display relabeling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Colors assigned to brands by first-seen index.
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,

    /// Display label for the first brand. Empty keeps its real name.
    #[serde(default = "default_placeholder_label")]
    pub placeholder_label: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            placeholder_label: default_placeholder_label(),
        }
    }
}

fn default_colors() -> Vec<String> {
    default_palette().into_iter().map(|c| c.0).collect()
}

fn default_placeholder_label() -> String {
    "Unknown".to_string()
}

/// Stage script settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Brand whose timeline is introduced first, with axes.
    #[serde(default = "default_focus_brand")]
    pub focus_brand: String,

    /// z distance between timelines in the depth fan-out.
    #[serde(default = "default_depth_spacing")]
    pub depth_spacing: f64,

    /// Stage titles.
    #[serde(default)]
    pub titles: StageTitles,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            focus_brand: default_focus_brand(),
            depth_spacing: default_depth_spacing(),
            titles: StageTitles::default(),
        }
    }
}

fn default_focus_brand() -> String {
    "Samsung".to_string()
}

fn default_depth_spacing() -> f64 {
    0.5
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.general.input = input.display().to_string();
        }
        if let Some(ref output) = args.output {
            self.general.output = Some(output.display().to_string());
        }

        if let Some(width) = args.width {
            self.chart.width = width;
        }
        if let Some(height) = args.height {
            self.chart.height = height;
        }

        if let Some(ref focus) = args.focus_brand {
            self.scene.focus_brand = focus.clone();
        }
        if let Some(ref label) = args.placeholder_label {
            self.palette.placeholder_label = label.clone();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Resolve the settings used to build presentation data.
    pub fn presentation_settings(&self) -> Result<PresentationSettings> {
        let palette: Vec<Color> = self.palette.colors.iter().map(Color::new).collect();
        if palette.is_empty() {
            bail!("Palette must contain at least one color");
        }
        if let Some(bad) = palette.iter().find(|c| !c.is_valid_hex()) {
            bail!("Invalid palette color '{}': expected #RRGGBB", bad);
        }

        let range = ValueRange::new(self.chart.y_min, self.chart.y_max, self.chart.y_step);
        range
            .validate()
            .context("Invalid [chart] value range")?;

        if !(self.chart.width > 0.0 && self.chart.height > 0.0) {
            bail!(
                "Chart width and height must be positive (got {} x {})",
                self.chart.width,
                self.chart.height
            );
        }

        let placeholder_label = Some(self.palette.placeholder_label.trim())
            .filter(|label| !label.is_empty())
            .map(str::to_string);

        Ok(PresentationSettings {
            width: self.chart.width,
            height: self.chart.height,
            range,
            palette,
            placeholder_label,
            focus_brand: self.scene.focus_brand.clone(),
            depth_spacing: self.scene.depth_spacing,
            legend_column_width: self.chart.legend_column_width,
            titles: self.scene.titles.clone(),
        })
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
