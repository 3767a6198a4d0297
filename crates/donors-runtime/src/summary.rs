//! Counters describing one batch run.

use std::path::Path;

use donors_core::settings::TruncatedPolicy;
use donors_core::{DonorsError, Result};
use serde::Serialize;

/// What happened during a run, reported at the end and optionally saved as
/// JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Lines delivered by the reader.
    pub lines_read: u64,
    /// Chunks delivered by the reader.
    pub chunks_read: u64,
    /// Records that failed the committee/amount/other-id gate.
    pub records_dropped: u64,
    /// Lines with too few fields that were skipped.
    pub lines_truncated: u64,
    /// Records that updated a date aggregate.
    pub date_updates: u64,
    /// Lines written to the zip output.
    pub zip_lines_written: u64,
    /// Lines written to the date output.
    pub date_lines_written: u64,
    /// Distinct (committee, zip prefix) keys.
    pub zip_keys: usize,
    /// Distinct (committee, date) keys.
    pub date_keys: usize,
    /// Policy applied to truncated lines.
    pub truncated_policy: TruncatedPolicy,
    /// Wall-clock seconds for the whole run.
    pub elapsed_seconds: f64,
}

impl RunSummary {
    /// Pretty JSON rendering.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON rendering to `path`, replacing any existing file.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| DonorsError::FileWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
