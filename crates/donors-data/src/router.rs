//! Routes one raw line into the zip and date aggregates.

use donors_core::models::{AggregateKey, RawRecord, StatsLine};
use donors_core::validation::{
    parse_amount, valid_core, valid_transaction_date, valid_zip, zip_prefix,
};
use donors_core::Result;
use tracing::trace;

use crate::store::AggregateStore;

// ── Routed ────────────────────────────────────────────────────────────────────

/// What a single record did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    /// Failed the committee/amount/other-id gate; no aggregate touched.
    Dropped,
    /// Passed the gate. `date_updated` is set when the date aggregate was
    /// updated; `zip_line` carries the zip statistics when the zip was valid.
    Accepted {
        date_updated: bool,
        zip_line: Option<StatsLine>,
    },
}

impl Routed {
    /// The zip-stream output line for this record, if any.
    pub fn zip_line(&self) -> Option<&StatsLine> {
        match self {
            Routed::Accepted { zip_line, .. } => zip_line.as_ref(),
            Routed::Dropped => None,
        }
    }
}

// ── RecordRouter ──────────────────────────────────────────────────────────────

/// Applies records to an [`AggregateStore`] strictly in the order given.
pub struct RecordRouter<'s> {
    store: &'s mut AggregateStore,
}

impl<'s> RecordRouter<'s> {
    pub fn new(store: &'s mut AggregateStore) -> Self {
        Self { store }
    }

    /// Route one line (without terminator) and return the zip output line.
    ///
    /// Returns `Ok(None)` for records that are filtered out or that have no
    /// usable zip code. Fails only with
    /// [`TruncatedRecord`](donors_core::DonorsError::TruncatedRecord).
    pub fn route(&mut self, line: &str) -> Result<Option<String>> {
        let routed = self.route_line(line)?;
        Ok(routed.zip_line().map(ToString::to_string))
    }

    /// Like [`RecordRouter::route`] but reports what happened.
    pub fn route_line(&mut self, line: &str) -> Result<Routed> {
        let record = RawRecord::parse(line)?;
        self.route_record(&record)
    }

    /// Validate `record` and update the aggregates it qualifies for.
    pub fn route_record(&mut self, record: &RawRecord<'_>) -> Result<Routed> {
        if !valid_core(
            record.committee_id,
            record.transaction_amount,
            record.other_id,
        ) {
            trace!(committee = record.committee_id, "record filtered out");
            return Ok(Routed::Dropped);
        }
        let Some(amount) = parse_amount(record.transaction_amount) else {
            return Ok(Routed::Dropped);
        };

        let date_updated = valid_transaction_date(record.transaction_date);
        if date_updated {
            self.store.record_date(
                AggregateKey::new(record.committee_id, record.transaction_date),
                amount,
            );
        }

        let zip_line = if valid_zip(record.zip_code) {
            let key = AggregateKey::new(record.committee_id, zip_prefix(record.zip_code));
            let stats = self.store.record_zip(key.clone(), amount)?;
            Some(StatsLine::new(key, stats))
        } else {
            None
        };

        Ok(Routed::Accepted {
            date_updated,
            zip_line,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use donors_core::DonorsError;

    /// Build a 21-field FEC line with the five consumed columns filled in.
    fn line(cmte: &str, zip: &str, date: &str, amount: &str, other: &str) -> String {
        let mut fields = vec![""; 21];
        fields[0] = cmte;
        fields[10] = zip;
        fields[13] = date;
        fields[14] = amount;
        fields[15] = other;
        fields.join("|")
    }

    fn route_all(store: &mut AggregateStore, lines: &[String]) -> Vec<Option<String>> {
        let mut router = RecordRouter::new(store);
        lines.iter().map(|l| router.route(l).unwrap()).collect()
    }

    // ── zip stream ────────────────────────────────────────────────────────────

    #[test]
    fn test_snapshot_per_record() {
        let mut store = AggregateStore::new();
        let out = route_all(
            &mut store,
            &[
                line("C1", "00001", "01012020", "100.00", ""),
                line("C1", "00002", "01012020", "50.00", ""),
                line("C1", "00001", "01012020", "300.00", ""),
            ],
        );
        assert_eq!(
            out,
            vec![
                Some("C1|00001|100|1|100".to_string()),
                Some("C1|00002|50|1|50".to_string()),
                Some("C1|00001|200|2|400".to_string()),
            ]
        );
    }

    #[test]
    fn test_zip_key_uses_first_five_characters() {
        let mut store = AggregateStore::new();
        let out = route_all(
            &mut store,
            &[
                line("C1", "028956146", "01012020", "10", ""),
                line("C1", "028950000", "01012020", "20", ""),
            ],
        );
        assert_eq!(out[1].as_deref(), Some("C1|02895|15|2|30"));
        assert_eq!(store.zip_len(), 1);
    }

    #[test]
    fn test_fec_sample_stream() {
        let mut store = AggregateStore::new();
        let out = route_all(
            &mut store,
            &[
                line("C00629618", "90017", "01032017", "40", "H6CA34245"),
                line("C00177436", "30004", "01312017", "384", ""),
                line("C00384818", "02895", "01122017", "250", ""),
                line("C00177436", "30004", "01312017", "230", ""),
                line("C00177436", "30004", "01312017", "384", ""),
                line("C00384818", "02895", "01122017", "333", ""),
                line("C00384818", "02895", "01122017", "384", ""),
            ],
        );
        let emitted: Vec<String> = out.into_iter().flatten().collect();
        assert_eq!(
            emitted,
            vec![
                "C00177436|30004|384|1|384",
                "C00384818|02895|250|1|250",
                "C00177436|30004|307|2|614",
                "C00177436|30004|384|3|998",
                "C00384818|02895|292|2|583",
                "C00384818|02895|333|3|967",
            ]
        );
    }

    // ── filtering ─────────────────────────────────────────────────────────────

    #[test]
    fn test_other_id_drops_from_both_aggregates() {
        let mut store = AggregateStore::new();
        let mut router = RecordRouter::new(&mut store);
        let routed = router
            .route_line(&line("C1", "00001", "01012020", "100", "X"))
            .unwrap();
        assert_eq!(routed, Routed::Dropped);
        assert_eq!(store.zip_len(), 0);
        assert_eq!(store.date_len(), 0);
    }

    #[test]
    fn test_missing_committee_or_amount_dropped() {
        let mut store = AggregateStore::new();
        let out = route_all(
            &mut store,
            &[
                line("", "00001", "01012020", "100", ""),
                line("C1", "00001", "01012020", "", ""),
                line("C1", "00001", "01012020", "ten", ""),
            ],
        );
        assert_eq!(out, vec![None, None, None]);
        assert_eq!(store.zip_len(), 0);
        assert_eq!(store.date_len(), 0);
    }

    #[test]
    fn test_invalid_zip_still_updates_date() {
        let mut store = AggregateStore::new();
        let mut router = RecordRouter::new(&mut store);
        let routed = router
            .route_line(&line("C1", "123", "01012020", "75", ""))
            .unwrap();
        assert_eq!(
            routed,
            Routed::Accepted {
                date_updated: true,
                zip_line: None
            }
        );
        assert_eq!(store.zip_len(), 0);
        assert_eq!(store.dump_date().unwrap()[0].to_string(), "C1|01012020|75|1|75");
    }

    #[test]
    fn test_invalid_date_still_updates_zip() {
        let mut store = AggregateStore::new();
        let out = route_all(&mut store, &[line("C1", "00001", "02302020", "75", "")]);
        assert_eq!(out, vec![Some("C1|00001|75|1|75".to_string())]);
        assert_eq!(store.date_len(), 0);
    }

    // ── date aggregates ───────────────────────────────────────────────────────

    #[test]
    fn test_date_view_sorted_as_text() {
        let mut store = AggregateStore::new();
        route_all(
            &mut store,
            &[
                line("C1", "00001", "12312019", "10", ""),
                line("C1", "00001", "01012020", "20", ""),
            ],
        );
        let dates: Vec<String> = store
            .dump_date()
            .unwrap()
            .into_iter()
            .map(|l| l.key.secondary)
            .collect();
        assert_eq!(dates, vec!["01012020", "12312019"]);
    }

    // ── malformed lines ───────────────────────────────────────────────────────

    #[test]
    fn test_truncated_line_is_an_error() {
        let mut store = AggregateStore::new();
        let mut router = RecordRouter::new(&mut store);
        let err = router.route("C1|N|TER|P").unwrap_err();
        assert!(matches!(err, DonorsError::TruncatedRecord { found: 4, .. }));
        assert_eq!(store.zip_len(), 0);
    }
}
