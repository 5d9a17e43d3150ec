//! Entity model for the per-user `user_playlist_tracks` table.

use chrono::NaiveDate;
use pulse_core::record::PlaylistTrackRow;
use pulse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_playlist_tracks` table.
///
/// Scoped by `playlist_ref` (the owning `playlists.id`) instead of the
/// upstream playlist id string; the playlist row carries the user
/// scoping.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserTrack {
    pub id: DbId,
    pub playlist_ref: DbId,
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

impl UserTrack {
    /// Rebuild the logical row, re-attaching the upstream playlist id
    /// held by the owning playlist row.
    pub fn into_row(self, spotify_playlist_id: &str) -> PlaylistTrackRow {
        PlaylistTrackRow {
            playlist_id: spotify_playlist_id.to_string(),
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
