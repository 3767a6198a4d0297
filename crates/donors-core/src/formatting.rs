//! Integer rendering of running statistics and output line assembly.

/// Separator between the fields of input records and output lines.
pub const FIELD_SEPARATOR: char = '|';

/// Round a median to the nearest integer, halves away from zero.
///
/// # Examples
///
/// ```
/// use donors_core::formatting::round_median;
///
/// assert_eq!(round_median(2.5), 3);
/// assert_eq!(round_median(2.4999), 2);
/// assert_eq!(round_median(-2.5), -3);
/// ```
pub fn round_median(median: f64) -> i64 {
    median.round() as i64
}

/// Truncate a running total toward zero.
///
/// # Examples
///
/// ```
/// use donors_core::formatting::truncate_total;
///
/// assert_eq!(truncate_total(400.99), 400);
/// assert_eq!(truncate_total(-12.7), -12);
/// ```
pub fn truncate_total(total: f64) -> i64 {
    total.trunc() as i64
}

/// Join pipe-separated fields into one output line.
pub fn join_fields(fields: &[&str]) -> String {
    let mut buf = [0u8; 4];
    let sep: &str = FIELD_SEPARATOR.encode_utf8(&mut buf);
    fields.join(sep)
}

/// Newline-joined lines with no trailing newline.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n")
}
