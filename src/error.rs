//! Error types for loading, aggregation and layout.
//!
//! Library modules return these typed errors; `main` wraps them with
//! `anyhow` context at the binary edge.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the review dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected dataset shape at {location}: {reason}")]
    Shape { location: String, reason: String },

    #[error("invalid score {value} in {brand}/{product}: expected an integer from 1 to 5")]
    InvalidScore {
        brand: String,
        product: String,
        value: String,
    },
}

/// Errors raised by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A mean was requested over zero reviews.
    #[error("no reviews available for {scope}")]
    EmptyDataset { scope: String },

    /// The requested brand key does not exist in the dataset.
    #[error("unknown brand: {0}")]
    UnknownBrand(String),
}

/// Errors raised by the chart layout code on malformed input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid value range (min {min}, max {max}, step {step})")]
    InvalidRange { min: f64, max: f64, step: f64 },

    #[error("length mismatch: {times} time keys but {values} values")]
    LengthMismatch { times: usize, values: usize },

    #[error("color palette is empty")]
    EmptyPalette,

    #[error("chart dimensions must be positive (width {width}, height {height})")]
    InvalidDimensions { width: f64, height: f64 },
}

/// Errors raised while assembling presentation data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PresentationError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnalysisError::EmptyDataset {
            scope: "brand Apple".to_string(),
        };
        assert_eq!(err.to_string(), "no reviews available for brand Apple");

        let err = AnalysisError::UnknownBrand("Foo".to_string());
        assert_eq!(err.to_string(), "unknown brand: Foo");

        let err = GeometryError::LengthMismatch {
            times: 2,
            values: 3,
        };
        assert!(err.to_string().contains("2 time keys"));
    }
}
