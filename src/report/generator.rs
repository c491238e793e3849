//! Report generation.
//!
//! Renders [`PresentationData`] either as JSON for the animation renderer
//! or as a Markdown summary for people.

use crate::analysis::period_coverage;
use crate::presentation::{BrandTimeline, PresentationData};
use crate::models::TimePeriodAverage;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Generate a complete Markdown summary.
pub fn generate_markdown_report(data: &PresentationData) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# Brand Review Summary\n\n");

    output.push_str(&generate_overview_section(data));
    output.push_str(&generate_ranking_section(data));
    output.push_str(&generate_period_section(&data.overall_series));
    output.push_str(&generate_coverage_section(&data.brand_timelines));
    output.push_str(&generate_layout_section(data));
    output.push_str(&generate_footer());

    output
}

/// Generate the overview section.
fn generate_overview_section(data: &PresentationData) -> String {
    let mut section = String::new();

    section.push_str("## Overview\n\n");
    section.push_str(&format!(
        "- **Population Mean:** {:.3}\n",
        data.population_mean
    ));
    section.push_str(&format!("- **Brands:** {}\n", data.styles.len()));
    section.push_str(&format!("- **Periods:** {}\n", data.overall_series.len()));
    if let Some((first, last)) = period_coverage(&data.overall_series) {
        section.push_str(&format!("- **Coverage:** {} to {}\n", first, last));
    }
    if !data.focus_brand.is_empty() {
        section.push_str(&format!("- **Focus Brand:** {}\n", data.focus_brand));
    }
    section.push('\n');

    section
}

/// Generate the ranked brand table.
fn generate_ranking_section(data: &PresentationData) -> String {
    let mut section = String::new();

    section.push_str("## Brand Ranking\n\n");

    if data.styles.is_empty() {
        section.push_str("No brands in the dataset.\n\n");
        return section;
    }

    section.push_str("| Rank | Brand | Key | Mean Score | Color |\n");
    section.push_str("|:---:|:---|:---|:---:|:---:|\n");

    for entry in &data.ranking {
        let label = data.styles.label_of(&entry.brand).unwrap_or(entry.brand.as_str());
        let color = data
            .styles
            .color_of(&entry.brand)
            .map(|c| c.as_str())
            .unwrap_or_default();
        section.push_str(&format!(
            "| {} | {} | `{}` | {:.3} | `{}` |\n",
            entry.rank + 1,
            label,
            entry.brand,
            entry.mean_score,
            color
        ));
    }
    section.push('\n');

    section
}

/// Generate the overall per-period table.
fn generate_period_section(series: &[TimePeriodAverage]) -> String {
    let mut section = String::new();

    section.push_str("## Mean Score by Month\n\n");

    if series.is_empty() {
        section.push_str("No reviews with readable dates.\n\n");
        return section;
    }

    section.push_str("| Period | Mean Score |\n");
    section.push_str("|:---|:---:|\n");
    for period in series {
        section.push_str(&format!("| {} | {:.3} |\n", period.period, period.mean_score));
    }
    section.push('\n');

    section
}

/// Generate the per-brand coverage table.
fn generate_coverage_section(timelines: &[BrandTimeline]) -> String {
    if timelines.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Coverage by Brand\n\n");
    section.push_str("| Brand | Periods | First | Last |\n");
    section.push_str("|:---|:---:|:---:|:---:|\n");

    for timeline in timelines {
        let (first, last) = period_coverage(&timeline.series).unwrap_or(("-", "-"));
        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            timeline.label,
            timeline.series.len(),
            first,
            last
        ));
    }
    section.push('\n');

    section
}

/// Generate the chart geometry summary.
fn generate_layout_section(data: &PresentationData) -> String {
    let mut section = String::new();

    section.push_str("## Chart Layout\n\n");

    if !data.sorted_bars.is_empty() {
        section.push_str("| Slot | Brand | Base | Height |\n");
        section.push_str("|:---:|:---|:---:|:---:|\n");
        for bar in &data.sorted_bars.bars {
            let base = bar.base();
            section.push_str(&format!(
                "| {} | {} | ({:.2}, {:.2}) | {:.2} |\n",
                bar.index, bar.label, base.x, base.y, bar.height
            ));
        }
        section.push('\n');
    }

    let vertices = data.overall_line.vertices();
    if let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
        section.push_str(&format!(
            "- **Overall Line:** {} points from ({:.2}, {:.2}) to ({:.2}, {:.2})\n",
            vertices.len(),
            first.x,
            first.y,
            last.x,
            last.y
        ));
    }

    if !data.legend.is_empty() {
        let labels: Vec<&str> = data.legend.rows().map(|r| r.label.as_str()).collect();
        section.push_str(&format!(
            "- **Legend:** {} entries ({})\n",
            data.legend.len(),
            labels.join(", ")
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!(
        "*Generated by review-charts v{}*\n",
        env!("CARGO_PKG_VERSION")
    ));

    footer
}

/// Generate a JSON document for the renderer.
pub fn generate_json_report(data: &PresentationData) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(Into::into)
}

/// Write a report to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
