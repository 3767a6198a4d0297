//! Per-field well-formedness checks for raw contribution records.
//!
//! Every predicate is pure. A record that fails one of them is filtered out
//! of the affected aggregate; nothing here ever produces an error.

use chrono::NaiveDate;

/// Layout of `TRANSACTION_DT` in the source data.
pub const TRANSACTION_DATE_FORMAT: &str = "%m%d%Y";

/// Number of characters of `ZIP_CODE` used as the aggregation key.
pub const ZIP_PREFIX_LEN: usize = 5;

const TRANSACTION_DATE_LEN: usize = 8;

// ── Field predicates ──────────────────────────────────────────────────────────

/// `CMTE_ID` must be non-empty.
pub fn valid_committee_id(committee_id: &str) -> bool {
    !committee_id.is_empty()
}

/// `ZIP_CODE` must carry at least [`ZIP_PREFIX_LEN`] characters.
pub fn valid_zip(zip_code: &str) -> bool {
    zip_code.chars().count() >= ZIP_PREFIX_LEN
}

/// `TRANSACTION_DT` must be exactly eight characters and a real calendar date
/// in `MMDDYYYY` form.
///
/// The parsed date is formatted back and compared with the input, so inputs
/// that only parse thanks to lenient field widths are rejected as well.
///
/// ```
/// use donors_core::validation::valid_transaction_date;
///
/// assert!(valid_transaction_date("02292020"));
/// assert!(!valid_transaction_date("02302020"));
/// assert!(!valid_transaction_date("1152020"));
/// ```
pub fn valid_transaction_date(transaction_date: &str) -> bool {
    if transaction_date.len() != TRANSACTION_DATE_LEN {
        return false;
    }
    match NaiveDate::parse_from_str(transaction_date, TRANSACTION_DATE_FORMAT) {
        Ok(date) => date.format(TRANSACTION_DATE_FORMAT).to_string() == transaction_date,
        Err(_) => false,
    }
}

/// Parse `TRANSACTION_AMT` as a finite number.
///
/// Returns `None` for empty input, anything that is not a decimal number,
/// and the non-finite spellings (`inf`, `NaN`) the float parser accepts.
pub fn parse_amount(amount: &str) -> Option<f64> {
    if amount.is_empty() {
        return None;
    }
    amount.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// `TRANSACTION_AMT` must parse as a finite number.
pub fn valid_amount(amount: &str) -> bool {
    parse_amount(amount).is_some()
}

/// `OTHER_ID` must be empty; populated rows are transfers rather than
/// individual contributions.
pub fn valid_other_id(other_id: &str) -> bool {
    other_id.is_empty()
}

/// Gate shared by both aggregates: committee id, amount and other id.
pub fn valid_core(committee_id: &str, amount: &str, other_id: &str) -> bool {
    valid_committee_id(committee_id) && valid_amount(amount) && valid_other_id(other_id)
}

/// First [`ZIP_PREFIX_LEN`] characters of a zip code already accepted by
/// [`valid_zip`]. Shorter input is returned unchanged.
pub fn zip_prefix(zip_code: &str) -> &str {
    match zip_code.char_indices().nth(ZIP_PREFIX_LEN) {
        Some((end, _)) => &zip_code[..end],
        None => zip_code,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
