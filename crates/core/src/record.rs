//! Record shapes flowing through the ETL pipeline.
//!
//! Two stages of the same track: [`RawTrackRecord`] is the normalizer's
//! output (untyped strings preserved, every descriptive field optional),
//! [`PlaylistTrackRow`] is the transformer's output and the exact shape
//! both stores persist. Serialized with serde to produce the raw and
//! cleaned stage artifacts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A normalized-but-uncoerced track, one per playlist entry.
///
/// Field values are exactly what the upstream API reported: missing
/// nested paths become `None`, `album_release_date` keeps its raw string
/// form (Spotify reports day, month, or year precision), and
/// `track_genres` is attached by the enricher after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrackRecord {
    pub playlist_id: String,
    /// Upstream track id. `None` for local/placeholder tracks; such rows
    /// are rejected during transformation, never loaded.
    pub track_id: Option<String>,
    pub track_name: Option<String>,
    pub track_duration_ms: Option<i64>,
    pub track_popularity: Option<i32>,
    pub album_id: Option<String>,
    pub album_name: Option<String>,
    /// Raw upstream date string: `YYYY-MM-DD`, `YYYY-MM`, or `YYYY`.
    pub album_release_date: Option<String>,
    pub album_label: Option<String>,
    /// Index-aligned with `artist_names`.
    pub artist_ids: Vec<String>,
    pub artist_names: Vec<String>,
    /// Union of genre tags across contributing artists; empty until the
    /// enricher has run.
    #[serde(default)]
    pub track_genres: Vec<String>,
}

/// A fully coerced row keyed by `(playlist_id, track_id)`.
///
/// This is the shape merged into both stores. Derived fields are
/// computed from already-coerced inputs, so a `None` duration yields a
/// `None` derived duration rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTrackRow {
    pub playlist_id: String,
    pub track_id: String,
    pub track_name: Option<String>,
    pub track_duration_ms: Option<i64>,
    pub track_duration_sec: Option<f64>,
    pub track_popularity: Option<i32>,
    pub album_id: Option<String>,
    pub album_name: Option<String>,
    pub album_release_date: Option<NaiveDate>,
    pub album_label: Option<String>,
    pub release_year: Option<i32>,
    pub artist_ids: Vec<String>,
    pub artist_names: Vec<String>,
    /// Sorted and deduplicated, so re-loading an unchanged track writes
    /// byte-identical column values.
    pub track_genres: Vec<String>,
}

impl PlaylistTrackRow {
    /// The composite natural key for this row.
    pub fn key(&self) -> (&str, &str) {
        (&self.playlist_id, &self.track_id)
    }
}

/// Playlist-level metadata fetched alongside the track listing.
///
/// Stored on the per-user playlist row and refreshed on every analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistMeta {
    pub playlist_id: String,
    pub name: Option<String>,
    pub owner: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> PlaylistTrackRow {
        PlaylistTrackRow {
            playlist_id: "p1".to_string(),
            track_id: "t1".to_string(),
            track_name: Some("Song".to_string()),
            track_duration_ms: Some(200_000),
            track_duration_sec: Some(200.0),
            track_popularity: Some(80),
            album_id: Some("a1".to_string()),
            album_name: Some("Album".to_string()),
            album_release_date: NaiveDate::from_ymd_opt(2023, 1, 15),
            album_label: None,
            release_year: Some(2023),
            artist_ids: vec!["ar1".to_string(), "ar2".to_string()],
            artist_names: vec!["Artist 1".to_string(), "Artist 2".to_string()],
            track_genres: vec!["pop".to_string(), "rock".to_string()],
        }
    }

    #[test]
    fn row_round_trips_through_json() {
        let row = sample_row();
        let json = serde_json::to_string(&row).expect("serialization should succeed");
        let back: PlaylistTrackRow =
            serde_json::from_str(&json).expect("deserialization should succeed");
        assert_eq!(row, back);
    }

    #[test]
    fn raw_record_tolerates_missing_genres_field() {
        // Artifacts written before enrichment ran omit the field entirely.
        let json = r#"{
            "playlist_id": "p1",
            "track_id": "t1",
            "track_name": null,
            "track_duration_ms": null,
            "track_popularity": null,
            "album_id": null,
            "album_name": null,
            "album_release_date": null,
            "album_label": null,
            "artist_ids": [],
            "artist_names": []
        }"#;
        let record: RawTrackRecord = serde_json::from_str(json).unwrap();
        assert!(record.track_genres.is_empty());
    }

    #[test]
    fn key_exposes_both_components() {
        let row = sample_row();
        assert_eq!(row.key(), ("p1", "t1"));
    }
}
