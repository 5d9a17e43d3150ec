//! Batch transformer: raw records to load-ready rows.
//!
//! Applies total type coercion, computes derived fields from the
//! already-nulled-safe inputs, rejects rows with a malformed key before
//! they can reach a store, and deduplicates by `(playlist_id,
//! track_id)` with the last-seen occurrence winning.

use std::collections::HashMap;

use pulse_core::coerce::{duration_sec, parse_release_date, release_year};
use pulse_core::record::{PlaylistTrackRow, RawTrackRecord};

/// Result of transforming one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutcome {
    /// Load-ready rows, deduplicated, in first-seen key order.
    pub rows: Vec<PlaylistTrackRow>,
    /// Records dropped for a missing/empty track id.
    pub rejected: usize,
    /// Records superseded by a later occurrence of the same key.
    pub duplicates: usize,
}

/// Transform a full batch of raw records.
pub fn transform_batch(records: Vec<RawTrackRecord>) -> TransformOutcome {
    let mut rows: Vec<PlaylistTrackRow> = Vec::with_capacity(records.len());
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut rejected = 0;
    let mut duplicates = 0;

    for record in records {
        let Some(row) = coerce_record(record) else {
            rejected += 1;
            continue;
        };

        // Retried page fetches can replay a track; the last occurrence
        // wins but keeps the first occurrence's position.
        let key = (row.playlist_id.clone(), row.track_id.clone());
        match index.get(&key) {
            Some(&at) => {
                rows[at] = row;
                duplicates += 1;
            }
            None => {
                index.insert(key, rows.len());
                rows.push(row);
            }
        }
    }

    if rejected > 0 {
        tracing::warn!(rejected, "Dropped records with missing track ids");
    }

    TransformOutcome {
        rows,
        rejected,
        duplicates,
    }
}

/// Coerce one record into a load-ready row.
///
/// Returns `None` when the track id is missing or empty -- the one
/// malformation the store must never see.
fn coerce_record(record: RawTrackRecord) -> Option<PlaylistTrackRow> {
    let track_id = record.track_id.filter(|id| !id.is_empty())?;

    let album_release_date = record
        .album_release_date
        .as_deref()
        .and_then(parse_release_date);

    let mut track_genres = record.track_genres;
    track_genres.sort();
    track_genres.dedup();

    Some(PlaylistTrackRow {
        playlist_id: record.playlist_id,
        track_id,
        track_name: record.track_name,
        track_duration_ms: record.track_duration_ms,
        track_duration_sec: duration_sec(record.track_duration_ms),
        track_popularity: record.track_popularity,
        album_id: record.album_id,
        album_name: record.album_name,
        album_release_date,
        album_label: record.album_label,
        release_year: release_year(album_release_date),
        artist_ids: record.artist_ids,
        artist_names: record.artist_names,
        track_genres,
    })
}
