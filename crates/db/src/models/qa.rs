//! Data-quality report over the warehouse table.

use serde::Serialize;

/// Counts from the quality-check queries.
///
/// Findings here are informational: the load layer accepts suspect
/// values unchanged, and this report is where they surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QaReport {
    pub total_rows: i64,
    /// Keys appearing more than once. Always expected to be 0; anything
    /// else means the uniqueness constraint is broken.
    pub duplicate_keys: i64,
    pub missing_track_names: i64,
    pub non_positive_durations: i64,
    pub popularity_out_of_range: i64,
    pub rows_without_genres: i64,
}
