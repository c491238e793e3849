//! Analysis modules.
//!
//! Score aggregation over the review dataset.

pub mod aggregator;

pub use aggregator::*;
