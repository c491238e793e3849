//! Review score aggregation.
//!
//! Pure functions over a loaded [`Dataset`]: population and per-brand
//! means, and mean-score series bucketed by year-month.

use crate::error::AnalysisError;
use crate::models::{Brand, BrandAverage, Dataset, ReviewRecord, TimePeriodAverage, REVIEW_DATE_FORMAT};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Round to 3 decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Arithmetic mean of scores, rounded. `None` when there are no scores.
fn rounded_mean<'a>(reviews: impl Iterator<Item = &'a ReviewRecord>) -> Option<f64> {
    let (sum, count) = reviews.fold((0u64, 0usize), |(sum, count), r| {
        (sum + u64::from(r.score), count + 1)
    });

    if count == 0 {
        None
    } else {
        Some(round3(sum as f64 / count as f64))
    }
}

/// Mean score across every review of every non-sentinel brand.
pub fn population_mean(dataset: &Dataset) -> Result<f64, AnalysisError> {
    rounded_mean(dataset.brands().flat_map(Brand::reviews)).ok_or_else(|| {
        AnalysisError::EmptyDataset {
            scope: "all brands".to_string(),
        }
    })
}

/// Mean score across one brand's products.
pub fn brand_mean(dataset: &Dataset, brand: &str) -> Result<f64, AnalysisError> {
    let entry = dataset
        .brand(brand)
        .ok_or_else(|| AnalysisError::UnknownBrand(brand.to_string()))?;

    rounded_mean(entry.reviews()).ok_or_else(|| AnalysisError::EmptyDataset {
        scope: format!("brand {}", brand),
    })
}

/// Mean score of every brand, in dataset order.
pub fn brand_averages(dataset: &Dataset) -> Result<Vec<BrandAverage>, AnalysisError> {
    dataset
        .brands()
        .map(|b| {
            Ok(BrandAverage {
                brand: b.name.clone(),
                mean_score: brand_mean(dataset, &b.name)?,
            })
        })
        .collect()
}

/// Year-month bucket key for a review date, or `None` if it doesn't parse.
///
/// The month must be spelled out in full ("January", not "Jan").
pub fn period_key(date: &str) -> Option<String> {
    let parsed = NaiveDate::parse_from_str(date, REVIEW_DATE_FORMAT).ok()?;

    // chrono's %B also accepts abbreviations when parsing
    let month = date.split(char::is_whitespace).next()?;
    if !month.eq_ignore_ascii_case(&parsed.format("%B").to_string()) {
        return None;
    }

    Some(parsed.format("%Y-%m").to_string())
}

/// Mean score per year-month, ascending by period.
///
/// Restricted to one brand when `brand` is given; an unknown brand simply
/// matches nothing. Reviews with unparseable dates are left out of the
/// buckets but are still counted by [`population_mean`] and [`brand_mean`].
pub fn mean_by_period(dataset: &Dataset, brand: Option<&str>) -> Vec<TimePeriodAverage> {
    let mut buckets: BTreeMap<String, (u64, usize)> = BTreeMap::new();
    let mut skipped = 0usize;

    let selected = dataset
        .brands()
        .filter(|b| brand.map_or(true, |name| b.name == name));

    for review in selected.flat_map(Brand::reviews) {
        match period_key(&review.date) {
            Some(period) => {
                let bucket = buckets.entry(period).or_default();
                bucket.0 += u64::from(review.score);
                bucket.1 += 1;
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(
            "Skipped {} reviews with unparseable dates ({})",
            skipped,
            brand.unwrap_or("all brands")
        );
    }

    buckets
        .into_iter()
        .map(|(period, (sum, count))| {
            TimePeriodAverage::new(period, round3(sum as f64 / count as f64))
        })
        .collect()
}

/// First and last period of a series.
pub fn period_coverage(series: &[TimePeriodAverage]) -> Option<(&str, &str)> {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => Some((first.period.as_str(), last.period.as_str())),
        _ => None,
    }
}

/// Split a series into parallel period keys and mean scores.
pub fn split_series(series: &[TimePeriodAverage]) -> (Vec<String>, Vec<f64>) {
    series
        .iter()
        .map(|p| (p.period.clone(), p.mean_score))
        .unzip()
}
