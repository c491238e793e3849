//! review-charts - brand review statistics for animated charts
//!
//! A CLI tool that reads a cached phone-review dataset, aggregates mean
//! scores per brand and per month, and lays out the bar, line and legend
//! geometry an animation renderer draws.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing dataset, malformed JSON, bad config, etc.)

mod analysis;
mod chart;
mod cli;
mod config;
mod dataset;
mod error;
mod models;
mod presentation;
mod report;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use indicatif::{ProgressBar, ProgressStyle};
use models::Dataset;
use presentation::PresentationData;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    // Load configuration before logging so [general] verbose applies
    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    if let Err(e) = init_logging(args.log_level(config.general.verbose)) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    info!("review-charts v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    log_config_source(&source);

    if let Err(e) = run(args, config) {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .review-charts.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize chart size, palette, focus brand and titles.");
    Ok(())
}

/// Initialize logging at the resolved verbosity level.
fn init_logging(level: tracing::Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Load the dataset, build presentation data and write the report.
fn run(args: Args, config: Config) -> Result<()> {
    let start_time = Instant::now();

    let input = PathBuf::from(&config.general.input);
    let output = config
        .general
        .output
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| args.format.default_output());

    // Step 1: Load the dataset
    if !args.quiet {
        println!("📥 Loading dataset: {}", input.display());
    }
    let dataset = Dataset::load(&input)
        .with_context(|| format!("Failed to load dataset from {}", input.display()))?;

    // Handle --dry-run: summarize and exit
    if args.dry_run {
        handle_dry_run(&dataset);
        return Ok(());
    }

    // Step 2: Build the presentation
    let settings = config
        .presentation_settings()
        .context("Invalid chart configuration")?;

    let progress = if args.quiet {
        None
    } else {
        Some(timeline_progress())
    };

    let data = PresentationData::build_with_progress(&dataset, &settings, progress.as_ref())
        .context("Failed to build presentation data")?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    // Step 3: Render and save the report
    let rendered = match args.format {
        OutputFormat::Json => report::generate_json_report(&data)?,
        OutputFormat::Markdown => report::generate_markdown_report(&data),
    };

    report::write_report(&rendered, &output)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;

    let duration = start_time.elapsed().as_secs_f64();

    if !args.quiet {
        println!("\n📊 Summary:");
        println!("   {}", data.population_caption());
        if let Some(best) = data.ranking.first() {
            let label = data.styles.label_of(&best.brand).unwrap_or(best.brand.as_str());
            println!("   Top brand: {} ({:.3})", label, best.mean_score);
        }
        if let Some(focus) = data.timeline(&data.focus_brand) {
            println!(
                "   Focus brand: {} ({} months)",
                focus.label,
                focus.series.len()
            );
        }
        println!("   Months charted: {}", data.overall_series.len());
        println!("   Stages: {}", data.stages.len());
        println!("   Duration: {:.2}s", duration);
        println!("\n✅ Done! Output saved to: {}", output.display());
    }

    Ok(())
}

/// Progress bar for per-brand timeline layout.
fn timeline_progress() -> ProgressBar {
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::with_template("   {bar:30} {pos}/{len} timelines")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

/// Handle --dry-run: print what would be charted.
fn handle_dry_run(dataset: &Dataset) {
    println!("\n🔍 Dry run: dataset summary (no output written)...\n");

    let names = dataset.brand_names();
    if names.is_empty() {
        println!("   No brands found.");
    } else {
        println!("   Found {} brands:\n", names.len());
        for brand in dataset.brands() {
            println!(
                "     📱 {} ({} products, {} reviews)",
                brand.name,
                brand.products.len(),
                brand.review_count()
            );
        }
        println!("\n   Total: {} reviews", dataset.review_count());
    }

    match analysis::population_mean(dataset) {
        Ok(mean) => println!("   Population mean: {:.3}", mean),
        Err(e) => println!("   Population mean unavailable: {}", e),
    }
    if let Some((first, last)) =
        analysis::period_coverage(&analysis::mean_by_period(dataset, None))
    {
        println!("   Coverage: {} to {}", first, last);
    }

    println!("\n✅ Dry run complete.");
}

/// Where the effective configuration came from.
enum ConfigSource {
    File(PathBuf),
    Defaults,
    /// The default config file exists but could not be loaded.
    Fallback(anyhow::Error),
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so the outcome is reported afterwards
/// through [`log_config_source`].
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::File(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::File(PathBuf::from(CONFIG_FILE_NAME)))),
        Ok(None) => Ok((Config::default(), ConfigSource::Defaults)),
        Err(e) => Ok((Config::default(), ConfigSource::Fallback(e))),
    }
}

fn log_config_source(source: &ConfigSource) {
    match source {
        ConfigSource::File(path) => info!("Loaded config from: {}", path.display()),
        ConfigSource::Defaults => debug!("No config file found, using defaults"),
        ConfigSource::Fallback(e) => warn!("Failed to load config: {:#}", e),
    }
}
