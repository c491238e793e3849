//! Dataset loading.
//!
//! Reads the cached `formatted.json` file (brand -> product -> reviews)
//! into a typed [`Dataset`], keeping the source order of brands and
//! products.

use crate::error::DatasetError;
use crate::models::{Brand, Dataset, Product, ReviewRecord, SENTINEL_BRAND};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

impl Dataset {
    /// Load a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_json_str(&content)?;
        info!(
            "Loaded {} brands, {} products, {} reviews from {}",
            dataset.brands().count(),
            dataset.product_count(),
            dataset.review_count(),
            path.display()
        );

        Ok(dataset)
    }

    /// Parse a dataset from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, DatasetError> {
        let root: Value = serde_json::from_str(text)?;
        let brands = root.as_object().ok_or_else(|| DatasetError::Shape {
            location: "root".to_string(),
            reason: "expected an object of brands".to_string(),
        })?;

        let mut entries = Vec::with_capacity(brands.len());
        for (name, value) in brands {
            if name == SENTINEL_BRAND {
                // Header artifact: keep the key, ignore whatever it holds.
                debug!("Skipping contents of sentinel key '{}'", name);
                entries.push(Brand {
                    name: name.clone(),
                    products: Vec::new(),
                });
                continue;
            }

            let products = value.as_object().ok_or_else(|| DatasetError::Shape {
                location: name.clone(),
                reason: "expected an object of products".to_string(),
            })?;

            entries.push(Brand {
                name: name.clone(),
                products: parse_products(name, products)?,
            });
        }

        Ok(Dataset::new(entries))
    }
}

fn parse_products(brand: &str, products: &Map<String, Value>) -> Result<Vec<Product>, DatasetError> {
    let mut parsed = Vec::with_capacity(products.len());

    for (id, value) in products {
        let reviews = match value.as_array() {
            Some(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| parse_review(brand, id, i, item))
                .collect::<Result<Vec<_>, _>>()?,
            None => {
                // The ETL step writes a placeholder for products without reviews.
                debug!("Product {}/{} has no review list, treating as empty", brand, id);
                Vec::new()
            }
        };

        parsed.push(Product {
            id: id.clone(),
            reviews,
        });
    }

    Ok(parsed)
}

fn parse_review(
    brand: &str,
    product: &str,
    index: usize,
    item: &Value,
) -> Result<ReviewRecord, DatasetError> {
    let location = || format!("{}/{}[{}]", brand, product, index);

    let fields = item.as_array().ok_or_else(|| DatasetError::Shape {
        location: location(),
        reason: "expected a [score, date] pair".to_string(),
    })?;

    let (score_value, date_value) = match fields.as_slice() {
        [score, date, ..] => (score, date),
        _ => {
            return Err(DatasetError::Shape {
                location: location(),
                reason: format!("expected 2 fields, found {}", fields.len()),
            })
        }
    };

    let date = date_value.as_str().ok_or_else(|| DatasetError::Shape {
        location: location(),
        reason: "date must be a string".to_string(),
    })?;

    Ok(ReviewRecord::new(
        parse_score(brand, product, score_value)?,
        date,
    ))
}

/// Scores arrive as JSON integers or as numeric strings copied from the CSV.
fn parse_score(brand: &str, product: &str, value: &Value) -> Result<u8, DatasetError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match parsed {
        Some(score @ 1..=5) => Ok(score as u8),
        _ => Err(DatasetError::InvalidScore {
            brand: brand.to_string(),
            product: product.to_string(),
            value: value.to_string(),
        }),
    }
}
