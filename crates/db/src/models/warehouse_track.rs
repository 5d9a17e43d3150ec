//! Entity model for the `playlist_tracks` warehouse table.

use chrono::NaiveDate;
use pulse_core::record::PlaylistTrackRow;
use pulse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `playlist_tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WarehouseTrack {
    pub id: DbId,
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
    pub track_genres: Vec<String>,
    pub loaded_at: Timestamp,
}

impl WarehouseTrack {
    /// Strip store bookkeeping (`id`, `loaded_at`), leaving the logical
    /// row. Used for content comparison and re-export.
    pub fn into_row(self) -> PlaylistTrackRow {
        PlaylistTrackRow {
            playlist_id: self.playlist_id,
            track_id: self.track_id,
            track_name: self.track_name,
            track_duration_ms: self.track_duration_ms,
            track_duration_sec: self.track_duration_sec,
            track_popularity: self.track_popularity,
            album_id: self.album_id,
            album_name: self.album_name,
            album_release_date: self.album_release_date,
            album_label: self.album_label,
            release_year: self.release_year,
            artist_ids: self.artist_ids,
            artist_names: self.artist_names,
            track_genres: self.track_genres,
        }
    }
}
