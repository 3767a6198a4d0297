//! Per-key running aggregates for the zip-code and date views.
//!
//! The store is created once per run and owned by the caller; there is no
//! global state. Entries are created lazily on the first contribution for a
//! key and are never evicted.

use std::collections::{BTreeMap, HashMap};

use donors_core::formatting::{round_median, truncate_total};
use donors_core::median::MedianTracker;
use donors_core::models::{AggregateKey, ContributionStats, StatsLine};
use donors_core::{DonorsError, Result};

// ── AggregateEntry ────────────────────────────────────────────────────────────

/// Median tracker plus running total for one key.
#[derive(Debug, Clone, Default)]
pub struct AggregateEntry {
    tracker: MedianTracker,
    total: f64,
}

impl AggregateEntry {
    /// Accumulate one contribution.
    pub fn add(&mut self, amount: f64) {
        self.tracker.insert(amount);
        self.total += amount;
    }

    /// Number of contributions, taken from the tracker.
    pub fn count(&self) -> usize {
        self.tracker.len()
    }

    /// Untruncated running total.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Untruncated running median, `None` before the first contribution.
    pub fn median(&self) -> Option<f64> {
        self.tracker.median()
    }

    /// Integer-rendered snapshot, `None` before the first contribution.
    pub fn stats(&self) -> Option<ContributionStats> {
        let median = self.tracker.median()?;
        Some(ContributionStats {
            median: round_median(median),
            count: self.count(),
            total: truncate_total(self.total),
        })
    }
}

// ── AggregateStore ────────────────────────────────────────────────────────────

/// Zip-keyed and date-keyed aggregates for one run.
#[derive(Debug, Default)]
pub struct AggregateStore {
    by_zip: HashMap<AggregateKey, AggregateEntry>,
    // BTreeMap keeps the final dump sorted by (committee, date) text.
    by_date: BTreeMap<AggregateKey, AggregateEntry>,
}

impl AggregateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the zip aggregate for `key` and return its statistics
    /// including this contribution.
    pub fn record_zip(&mut self, key: AggregateKey, amount: f64) -> Result<ContributionStats> {
        let entry = self.by_zip.entry(key).or_default();
        entry.add(amount);
        entry
            .stats()
            .ok_or_else(|| DonorsError::EmptyAggregate("in zip view".to_string()))
    }

    /// Add `amount` to the date aggregate for `key`. Date statistics are only
    /// reported through [`AggregateStore::dump_date`].
    pub fn record_date(&mut self, key: AggregateKey, amount: f64) {
        self.by_date.entry(key).or_default().add(amount);
    }

    /// One line per date aggregate, ordered by committee id then date string
    /// (lexicographic, not chronological).
    pub fn dump_date(&self) -> Result<Vec<StatsLine>> {
        self.by_date
            .iter()
            .map(|(key, entry)| {
                entry
                    .stats()
                    .map(|stats| StatsLine::new(key.clone(), stats))
                    .ok_or_else(|| DonorsError::EmptyAggregate(key.to_string()))
            })
            .collect()
    }

    pub fn zip_entry(&self, key: &AggregateKey) -> Option<&AggregateEntry> {
        self.by_zip.get(key)
    }

    pub fn date_entry(&self, key: &AggregateKey) -> Option<&AggregateEntry> {
        self.by_date.get(key)
    }

    /// Number of distinct zip keys.
    pub fn zip_len(&self) -> usize {
        self.by_zip.len()
    }

    /// Number of distinct date keys.
    pub fn date_len(&self) -> usize {
        self.by_date.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
