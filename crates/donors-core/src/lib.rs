//! Core types for the political-donors pipeline.
//!
//! Field validation, the running-median structure, record and key models,
//! output formatting, errors and command-line settings.

pub mod error;
pub mod formatting;
pub mod median;
pub mod models;
pub mod settings;
pub mod validation;

pub use error::{DonorsError, Result};
