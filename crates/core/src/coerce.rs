//! Total type coercion for transformer output.
//!
//! Every function here is total: a value that cannot be coerced becomes
//! `None`, never an error. Upstream data quality problems are surfaced
//! by the QA queries downstream, not rejected here.

use chrono::NaiveDate;

/// Parse an upstream release date at any of Spotify's three precisions.
///
/// * `YYYY-MM-DD` parses as-is.
/// * `YYYY-MM` resolves to the first day of the month.
/// * `YYYY` resolves to January 1st.
///
/// Anything else (empty string, garbage, out-of-range components) yields
/// `None`.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    let mut parts = raw.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    match parts.next() {
        Some(month) => {
            let month: u32 = month.parse().ok()?;
            // A trailing third component here means the full-date parse
            // above already failed (e.g. "2023-02-30"), so give up.
            if parts.next().is_some() {
                return None;
            }
            NaiveDate::from_ymd_opt(year, month, 1)
        }
        None => NaiveDate::from_ymd_opt(year, 1, 1),
    }
}

/// Derive the release year from an already-coerced date.
pub fn release_year(date: Option<NaiveDate>) -> Option<i32> {
    use chrono::Datelike;
    date.map(|d| d.year())
}

/// Convert a duration in milliseconds to seconds.
///
/// `None` in, `None` out; a non-positive upstream duration is converted
/// as-is rather than corrected.
pub fn duration_sec(duration_ms: Option<i64>) -> Option<f64> {
    duration_ms.map(|ms| ms as f64 / 1000.0)
}
