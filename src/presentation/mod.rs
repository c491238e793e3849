//! Presentation assembly.
//!
//! Builds one immutable [`PresentationData`] value holding every series
//! and layout the animation stages need. Each stage reads from it by
//! reference; nothing downstream mutates it.

use crate::analysis::{brand_averages, mean_by_period, population_mean, split_series};
use crate::chart::palette::{default_palette, WHITE};
use crate::chart::{
    assign_rank, build_legend_rows, layout_bars, layout_line, sort_moves, BarLayout, BrandStyles,
    Color, LegendLayout, LineLayout, RankedBrand, SortMove, ValueRange,
};
use crate::error::PresentationError;
use crate::models::{BrandAverage, Dataset, TimePeriodAverage};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Inputs that shape the presentation, resolved from config and CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationSettings {
    pub width: f64,
    pub height: f64,
    pub range: ValueRange,
    pub palette: Vec<Color>,
    /// Display label for the first brand, if it should be relabeled.
    pub placeholder_label: Option<String>,
    /// Brand whose timeline is drawn first, with axes.
    pub focus_brand: String,
    /// z distance between neighbouring timelines in the depth fan-out.
    pub depth_spacing: f64,
    /// Width reserved for labels in the first legend column.
    pub legend_column_width: f64,
    pub titles: StageTitles,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 5.0,
            range: ValueRange::default(),
            palette: default_palette(),
            placeholder_label: Some("Unknown".to_string()),
            focus_brand: "Samsung".to_string(),
            depth_spacing: 0.5,
            legend_column_width: 2.0,
            titles: StageTitles::default(),
        }
    }
}

/// On-screen titles for each stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageTitles {
    pub intro: String,
    pub brand_bars: String,
    /// `{brand}` is replaced by the focus brand's display label.
    pub focus_timeline: String,
    pub all_timelines: String,
    pub merge: String,
}

impl Default for StageTitles {
    fn default() -> Self {
        Self {
            intro: "Comparing Phone Reviews to Date and Brand".to_string(),
            brand_bars: "Average Score of Different Brands".to_string(),
            focus_timeline: "Average Review Score Over Time ({brand})".to_string(),
            all_timelines: "Average Review Score Over Time (All Brands at once)".to_string(),
            merge: "All Brands Merge to Overall Average".to_string(),
        }
    }
}

/// Kind of animation step, in playback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Title,
    BrandBars,
    SortBars,
    FocusTimeline,
    AllTimelines,
    DepthFan,
    DepthReturn,
    MergeToAverage,
}

/// One step of the presentation script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub kind: StageKind,
    /// Title shown during the stage; `None` keeps the previous title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Time series of one brand with its line layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandTimeline {
    pub brand: String,
    pub label: String,
    pub color: Color,
    pub series: Vec<TimePeriodAverage>,
    pub layout: LineLayout,
    /// z offset during the depth fan-out.
    pub depth_offset: f64,
}

/// Everything the renderer needs, computed once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationData {
    pub population_mean: f64,
    /// Per-brand means in dataset order.
    pub brand_averages: Vec<BrandAverage>,
    pub ranking: Vec<RankedBrand>,
    pub styles: BrandStyles,
    pub unsorted_bars: BarLayout,
    pub sorted_bars: BarLayout,
    pub sort_moves: Vec<SortMove>,
    /// Data key of the brand drawn with axes.
    pub focus_brand: String,
    pub brand_timelines: Vec<BrandTimeline>,
    pub overall_series: Vec<TimePeriodAverage>,
    pub overall_line: LineLayout,
    pub overall_color: Color,
    pub legend: LegendLayout,
    pub stages: Vec<Stage>,
}

impl PresentationData {
    /// Build presentation data from a loaded dataset.
    pub fn build(
        dataset: &Dataset,
        settings: &PresentationSettings,
    ) -> Result<Self, PresentationError> {
        Self::build_with_progress(dataset, settings, None)
    }

    /// Build presentation data, ticking `progress` once per brand timeline.
    pub fn build_with_progress(
        dataset: &Dataset,
        settings: &PresentationSettings,
        progress: Option<&ProgressBar>,
    ) -> Result<Self, PresentationError> {
        let population_mean = population_mean(dataset)?;
        let averages = brand_averages(dataset)?;
        info!(
            "Population mean {:.3} across {} brands",
            population_mean,
            averages.len()
        );

        let keys: Vec<String> = averages.iter().map(|a| a.brand.clone()).collect();
        let styles = BrandStyles::assign(
            &keys,
            &settings.palette,
            settings.placeholder_label.as_deref(),
        )?;

        let unsorted_bars = bars_for(
            averages.iter().map(|a| (a.brand.as_str(), a.mean_score)),
            &styles,
            settings,
        )?;

        let ranking = assign_rank(&averages);
        let sorted_bars = bars_for(
            ranking.iter().map(|r| (r.brand.as_str(), r.mean_score)),
            &styles,
            settings,
        )?;
        let moves = sort_moves(&ranking);
        debug!("Computed {} bar moves for the sort stage", moves.len());

        let focus_brand = resolve_focus(&keys, &styles, &settings.focus_brand);

        if let Some(pb) = progress {
            pb.set_length(keys.len() as u64);
        }

        let mut brand_timelines = Vec::with_capacity(keys.len());
        for (i, style) in styles.styles().iter().enumerate() {
            let series = mean_by_period(dataset, Some(style.key.as_str()));
            let with_axes = focus_brand.as_deref() == Some(style.key.as_str());
            let layout = line_for(&series, settings, with_axes)?;

            if layout.is_empty() {
                warn!("Brand {} has no dated reviews; its timeline is empty", style.key);
            }

            brand_timelines.push(BrandTimeline {
                brand: style.key.clone(),
                label: style.label.clone(),
                color: style.color.clone(),
                series,
                layout,
                depth_offset: depth_offset(i, keys.len(), settings.depth_spacing),
            });

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        let overall_series = mean_by_period(dataset, None);
        let overall_line = line_for(&overall_series, settings, false)?;

        let labels: Vec<String> = styles.styles().iter().map(|s| s.label.clone()).collect();
        let legend = build_legend_rows(&labels, settings.legend_column_width, |i, _| {
            styles.styles()[i].color.clone()
        });

        let focus_label = focus_brand
            .as_deref()
            .and_then(|key| styles.label_of(key))
            .unwrap_or_default()
            .to_string();
        let stages = stage_script(&settings.titles, &focus_label);

        Ok(Self {
            population_mean,
            brand_averages: averages,
            ranking,
            styles,
            unsorted_bars,
            sorted_bars,
            sort_moves: moves,
            focus_brand: focus_brand.unwrap_or_default(),
            brand_timelines,
            overall_series,
            overall_line,
            overall_color: Color::new(WHITE),
            legend,
            stages,
        })
    }

    /// Timeline of one brand by data key.
    pub fn timeline(&self, brand: &str) -> Option<&BrandTimeline> {
        self.brand_timelines.iter().find(|t| t.brand == brand)
    }

    /// Caption for the population mean.
    pub fn population_caption(&self) -> String {
        format!("Average score of all phones: {}", self.population_mean)
    }
}

/// Bar layout for `(key, score)` pairs, labeled and colored by brand style.
fn bars_for<'a>(
    entries: impl Iterator<Item = (&'a str, f64)>,
    styles: &BrandStyles,
    settings: &PresentationSettings,
) -> Result<BarLayout, PresentationError> {
    let mut values = Vec::new();
    let mut labels = Vec::new();
    let mut colors = Vec::new();

    for (key, score) in entries {
        let style = styles.get(key);
        values.push(score);
        labels.push(style.map_or_else(|| key.to_string(), |s| s.label.clone()));
        colors.push(
            style
                .map(|s| s.color.clone())
                .unwrap_or_else(|| Color::new(WHITE)),
        );
    }

    Ok(layout_bars(
        &values,
        Some(labels.as_slice()),
        Some(colors.as_slice()),
        settings.range,
        settings.width,
        settings.height,
    )?)
}

fn line_for(
    series: &[TimePeriodAverage],
    settings: &PresentationSettings,
    with_axes: bool,
) -> Result<LineLayout, PresentationError> {
    let (times, values) = split_series(series);
    Ok(layout_line(
        &times,
        &values,
        settings.range,
        settings.width,
        settings.height,
        with_axes,
    )?)
}

/// Pick the focus brand by data key or display label, falling back to the
/// first brand when neither matches.
fn resolve_focus(keys: &[String], styles: &BrandStyles, wanted: &str) -> Option<String> {
    if keys.iter().any(|k| k == wanted) {
        return Some(wanted.to_string());
    }
    if let Some(key) = styles.key_for_label(wanted) {
        debug!("Focus brand '{}' matched by display label", wanted);
        return Some(key.to_string());
    }

    let fallback = keys.first().cloned();
    if let Some(ref brand) = fallback {
        warn!(
            "Focus brand '{}' not found, using '{}' instead",
            wanted, brand
        );
    }
    fallback
}

/// z offset of the `index`-th of `count` timelines, centered on 0.
pub fn depth_offset(index: usize, count: usize, spacing: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    index as f64 * spacing - (count - 1) as f64 * spacing / 2.0
}

fn stage_script(titles: &StageTitles, focus_label: &str) -> Vec<Stage> {
    let titled = |kind, title: &str| Stage {
        kind,
        title: Some(title.to_string()),
    };
    let untitled = |kind| Stage { kind, title: None };

    vec![
        titled(StageKind::Title, &titles.intro),
        titled(StageKind::BrandBars, &titles.brand_bars),
        untitled(StageKind::SortBars),
        titled(
            StageKind::FocusTimeline,
            &titles.focus_timeline.replace("{brand}", focus_label),
        ),
        titled(StageKind::AllTimelines, &titles.all_timelines),
        untitled(StageKind::DepthFan),
        untitled(StageKind::DepthReturn),
        titled(StageKind::MergeToAverage, &titles.merge),
    ]
}
