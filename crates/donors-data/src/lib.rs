//! Aggregation layer for the political-donors pipeline.
//!
//! Reads contribution lines in chunks, routes each record through the field
//! validators and keeps the per-key running statistics.

pub mod reader;
pub mod router;
pub mod store;

pub use donors_core as core;
