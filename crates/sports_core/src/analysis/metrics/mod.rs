//! # Metrics Module
//!
//! Statistical metrics over the enriched table.
//!
//! - `correlation` - Pearson correlation matrix and popularity correlation
//! - `descriptive` - Means, spread and per-column summaries

pub mod correlation;
pub mod descriptive;

pub use correlation::*;
pub use descriptive::*;
