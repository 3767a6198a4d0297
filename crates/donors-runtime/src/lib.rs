//! Batch runtime for the political-donors pipeline.
//!
//! Drives one contributions file through the aggregation layer, writes both
//! output streams and reports a [`summary::RunSummary`].

pub mod driver;
pub mod summary;

pub use donors_core as core;
pub use donors_data as data;
