//! Dashboard aggregations over loaded track rows.
//!
//! Pure counting over the denormalized artist and genre arrays; the API
//! layer calls these after reading a playlist's rows back from the
//! per-user store.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::PlaylistTrackRow;

/// A name with the number of tracks it appears on, ordered most-frequent
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCount {
    pub name: String,
    pub count: usize,
}

/// Count occurrences across tracks and return the `limit` most frequent.
///
/// Ties break alphabetically so the result is deterministic.
fn top_counts<'a, I>(values: I, limit: usize) -> Vec<NameCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .take(limit)
        .map(|(name, count)| NameCount {
            name: name.to_string(),
            count,
        })
        .collect()
}

/// The `limit` most frequent artists across the given rows.
pub fn top_artists(rows: &[PlaylistTrackRow], limit: usize) -> Vec<NameCount> {
    top_counts(
        rows.iter()
            .flat_map(|r| r.artist_names.iter().map(String::as_str)),
        limit,
    )
}

/// The `limit` most frequent genres across the given rows.
pub fn top_genres(rows: &[PlaylistTrackRow], limit: usize) -> Vec<NameCount> {
    top_counts(
        rows.iter()
            .flat_map(|r| r.track_genres.iter().map(String::as_str)),
        limit,
    )
}
