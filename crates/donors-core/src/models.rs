use std::fmt;

use crate::error::{DonorsError, Result};
use crate::formatting::{join_fields, FIELD_SEPARATOR};

// ── Record layout ─────────────────────────────────────────────────────────────

/// Zero-based column positions in the FEC individual contributions layout.
pub mod columns {
    pub const CMTE_ID: usize = 0;
    pub const ZIP_CODE: usize = 10;
    pub const TRANSACTION_DT: usize = 13;
    pub const TRANSACTION_AMT: usize = 14;
    pub const OTHER_ID: usize = 15;
}

/// A line must have at least this many fields to reach `OTHER_ID`.
pub const MIN_FIELDS: usize = columns::OTHER_ID + 1;

// ── RawRecord ─────────────────────────────────────────────────────────────────

/// Borrowed view of the five columns the pipeline consumes.
///
/// Fields are kept verbatim: no trimming, no case folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub committee_id: &'a str,
    pub zip_code: &'a str,
    pub transaction_date: &'a str,
    pub transaction_amount: &'a str,
    pub other_id: &'a str,
}

impl<'a> RawRecord<'a> {
    /// Split `line` on `|` and pick the consumed columns.
    ///
    /// `line` must not include its terminator. Lines with fewer than
    /// [`MIN_FIELDS`] fields yield [`DonorsError::TruncatedRecord`].
    pub fn parse(line: &'a str) -> Result<Self> {
        let fields: Vec<&'a str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() < MIN_FIELDS {
            return Err(DonorsError::TruncatedRecord {
                found: fields.len(),
                expected: MIN_FIELDS,
            });
        }
        Ok(Self {
            committee_id: fields[columns::CMTE_ID],
            zip_code: fields[columns::ZIP_CODE],
            transaction_date: fields[columns::TRANSACTION_DT],
            transaction_amount: fields[columns::TRANSACTION_AMT],
            other_id: fields[columns::OTHER_ID],
        })
    }
}

// ── AggregateKey ──────────────────────────────────────────────────────────────

/// `(committee id, secondary key)` where the secondary key is a zip prefix or
/// an `MMDDYYYY` date.
///
/// Ordering is lexicographic on both strings, so dates sort as text rather
/// than chronologically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregateKey {
    pub committee_id: String,
    pub secondary: String,
}

impl AggregateKey {
    pub fn new(committee_id: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            committee_id: committee_id.into(),
            secondary: secondary.into(),
        }
    }
}

impl fmt::Display for AggregateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.committee_id, FIELD_SEPARATOR, self.secondary)
    }
}

// ── ContributionStats ─────────────────────────────────────────────────────────

/// Integer-rendered statistics of one aggregate at a point in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionStats {
    /// Running median, rounded half away from zero.
    pub median: i64,
    /// Number of contributions seen.
    pub count: usize,
    /// Running total, truncated toward zero.
    pub total: i64,
}

// ── StatsLine ─────────────────────────────────────────────────────────────────

/// One output line: `committee|secondary|median|count|total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsLine {
    pub key: AggregateKey,
    pub stats: ContributionStats,
}

impl StatsLine {
    pub fn new(key: AggregateKey, stats: ContributionStats) -> Self {
        Self { key, stats }
    }
}

impl fmt::Display for StatsLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let median = self.stats.median.to_string();
        let count = self.stats.count.to_string();
        let total = self.stats.total.to_string();
        f.write_str(&join_fields(&[
            self.key.committee_id.as_str(),
            self.key.secondary.as_str(),
            median.as_str(),
            count.as_str(),
            total.as_str(),
        ]))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
