//! Data models for review aggregation.
//!
//! This module contains the core data structures shared by the loader,
//! the aggregator and the chart layout code: review records, the nested
//! dataset, and the derived averages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved top-level key left behind by the CSV header row.
pub const SENTINEL_BRAND: &str = "brand";

/// Date format used by review records, e.g. "January 1, 2020".
pub const REVIEW_DATE_FORMAT: &str = "%B %d, %Y";

/// A single review: a 1-5 star score and the date it was posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Star rating (1..=5).
    pub score: u8,
    /// Posting date in "Month Day, Year" form. May be malformed.
    pub date: String,
}

impl ReviewRecord {
    pub fn new(score: u8, date: impl Into<String>) -> Self {
        Self {
            score,
            date: date.into(),
        }
    }
}

/// A product and its reviews, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier (ASIN in the source data).
    pub id: String,
    /// Reviews for this product.
    pub reviews: Vec<ReviewRecord>,
}

/// A brand and its products, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    /// Brand name, also the data key used for lookups.
    pub name: String,
    /// Products sold under this brand.
    pub products: Vec<Product>,
}

impl Brand {
    /// Iterate over every review of every product.
    pub fn reviews(&self) -> impl Iterator<Item = &ReviewRecord> {
        self.products.iter().flat_map(|p| p.reviews.iter())
    }

    /// Total number of reviews across all products.
    pub fn review_count(&self) -> usize {
        self.products.iter().map(|p| p.reviews.len()).sum()
    }

    /// Whether this entry is the CSV header artifact.
    pub fn is_sentinel(&self) -> bool {
        self.name == SENTINEL_BRAND
    }
}

/// Nested review dataset: brand -> product -> reviews.
///
/// Brand and product order follow the source file. The sentinel key is
/// kept so the dataset mirrors its source, but every accessor used for
/// aggregation skips it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    entries: Vec<Brand>,
}

impl Dataset {
    /// Build a dataset from brands in their source order.
    pub fn new(entries: Vec<Brand>) -> Self {
        Self { entries }
    }

    /// Non-sentinel brands in source order.
    pub fn brands(&self) -> impl Iterator<Item = &Brand> {
        self.entries.iter().filter(|b| !b.is_sentinel())
    }

    /// Names of the non-sentinel brands in source order.
    pub fn brand_names(&self) -> Vec<String> {
        self.brands().map(|b| b.name.clone()).collect()
    }

    /// Look up a brand by data key. The sentinel is never returned.
    pub fn brand(&self, name: &str) -> Option<&Brand> {
        self.brands().find(|b| b.name == name)
    }

    /// Total number of reviews across non-sentinel brands.
    pub fn review_count(&self) -> usize {
        self.brands().map(Brand::review_count).sum()
    }

    /// Total number of products across non-sentinel brands.
    pub fn product_count(&self) -> usize {
        self.brands().map(|b| b.products.len()).sum()
    }
}

/// Mean review score of one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandAverage {
    /// Brand data key.
    pub brand: String,
    /// Mean score rounded to 3 decimals.
    pub mean_score: f64,
}

/// Mean review score within one year-month bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePeriodAverage {
    /// Period key in "YYYY-MM" form.
    pub period: String,
    /// Mean score rounded to 3 decimals.
    pub mean_score: f64,
}

impl TimePeriodAverage {
    pub fn new(period: impl Into<String>, mean_score: f64) -> Self {
        Self {
            period: period.into(),
            mean_score,
        }
    }
}

impl fmt::Display for TimePeriodAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.3}", self.period, self.mean_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            Brand {
                name: SENTINEL_BRAND.to_string(),
                products: vec![Product {
                    id: "asin".to_string(),
                    reviews: Vec::new(),
                }],
            },
            Brand {
                name: "Apple".to_string(),
                products: vec![
                    Product {
                        id: "p1".to_string(),
                        reviews: vec![
                            ReviewRecord::new(5, "January 1, 2020"),
                            ReviewRecord::new(4, "January 3, 2020"),
                        ],
                    },
                    Product {
                        id: "p2".to_string(),
                        reviews: vec![ReviewRecord::new(2, "March 9, 2019")],
                    },
                ],
            },
            Brand {
                name: "Nokia".to_string(),
                products: Vec::new(),
            },
        ])
    }

    #[test]
    fn test_brands_skip_sentinel() {
        let dataset = sample_dataset();
        assert_eq!(dataset.brand_names(), vec!["Apple", "Nokia"]);
        assert!(dataset.brand(SENTINEL_BRAND).is_none());
        assert!(dataset.brand("Apple").is_some());
    }

    #[test]
    fn test_counts() {
        let dataset = sample_dataset();
        assert_eq!(dataset.review_count(), 3);
        assert_eq!(dataset.product_count(), 2);
        assert_eq!(dataset.brand("Apple").map(Brand::review_count), Some(3));
        assert_eq!(dataset.brand("Nokia").map(Brand::review_count), Some(0));
    }

    #[test]
    fn test_period_display() {
        let period = TimePeriodAverage::new("2020-01", 4.0);
        assert_eq!(period.to_string(), "2020-01: 4.000");
    }
}
