//! Repository for the per-user `user_playlist_tracks` table.
//!
//! The merge path here is the interactive-scale realization of the
//! loader contract: per-row lookup by key, then update-if-found /
//! insert-if-not, all inside one per-batch transaction so a mid-batch
//! failure rolls the whole batch back.

use pulse_core::record::PlaylistTrackRow;
use pulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::user_track::UserTrack;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, playlist_ref, track_id, track_name, track_duration_ms, \
    track_duration_sec, track_popularity, album_id, album_name, album_release_date, \
    album_label, release_year, artist_ids, artist_names, track_genres, loaded_at";

/// Provides the per-row merge and read access for user-scoped rows.
pub struct UserTrackRepo;

impl UserTrackRepo {
    /// Merge a batch of rows into the given playlist's track set.
    ///
    /// Every non-key column is replaced on update, including with an
    /// incoming null. Returns the number of rows written.
    pub async fn merge_batch(
        pool: &PgPool,
        playlist_ref: DbId,
        rows: &[PlaylistTrackRow],
    ) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;
        let mut inserted = 0u64;
        let mut updated = 0u64;

        for row in rows {
            let existing: Option<(DbId,)> = sqlx::query_as(
                "SELECT id FROM user_playlist_tracks \
                 WHERE playlist_ref = $1 AND track_id = $2",
            )
            .bind(playlist_ref)
            .bind(&row.track_id)
            .fetch_optional(&mut *tx)
            .await?;

            match existing {
                Some((id,)) => {
                    sqlx::query(
                        "UPDATE user_playlist_tracks SET \
                            track_name = $2, \
                            track_duration_ms = $3, \
                            track_duration_sec = $4, \
                            track_popularity = $5, \
                            album_id = $6, \
                            album_name = $7, \
                            album_release_date = $8, \
                            album_label = $9, \
                            release_year = $10, \
                            artist_ids = $11, \
                            artist_names = $12, \
                            track_genres = $13, \
                            loaded_at = now() \
                         WHERE id = $1",
                    )
                    .bind(id)
                    .bind(&row.track_name)
                    .bind(row.track_duration_ms)
                    .bind(row.track_duration_sec)
                    .bind(row.track_popularity)
                    .bind(&row.album_id)
                    .bind(&row.album_name)
                    .bind(row.album_release_date)
                    .bind(&row.album_label)
                    .bind(row.release_year)
                    .bind(&row.artist_ids)
                    .bind(&row.artist_names)
                    .bind(&row.track_genres)
                    .execute(&mut *tx)
                    .await?;
                    updated += 1;
                }
                None => {
                    sqlx::query(
                        "INSERT INTO user_playlist_tracks ( \
                            playlist_ref, track_id, track_name, track_duration_ms, \
                            track_duration_sec, track_popularity, album_id, album_name, \
                            album_release_date, album_label, release_year, artist_ids, \
                            artist_names, track_genres) \
                         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
                    )
                    .bind(playlist_ref)
                    .bind(&row.track_id)
                    .bind(&row.track_name)
                    .bind(row.track_duration_ms)
                    .bind(row.track_duration_sec)
                    .bind(row.track_popularity)
                    .bind(&row.album_id)
                    .bind(&row.album_name)
                    .bind(row.album_release_date)
                    .bind(&row.album_label)
                    .bind(row.release_year)
                    .bind(&row.artist_ids)
                    .bind(&row.artist_names)
                    .bind(&row.track_genres)
                    .execute(&mut *tx)
                    .await?;
                    inserted += 1;
                }
            }
        }

        tx.commit().await?;

        tracing::debug!(playlist_ref, inserted, updated, "Merged batch into user_playlist_tracks");
        Ok(inserted + updated)
    }

    /// List all track rows for a playlist, in insertion order.
    pub async fn list_by_playlist(
        pool: &PgPool,
        playlist_ref: DbId,
    ) -> Result<Vec<UserTrack>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_playlist_tracks WHERE playlist_ref = $1 ORDER BY id"
        );
        sqlx::query_as::<_, UserTrack>(&query)
            .bind(playlist_ref)
            .fetch_all(pool)
            .await
    }

    /// Track count for a playlist.
    pub async fn count_by_playlist(pool: &PgPool, playlist_ref: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM user_playlist_tracks WHERE playlist_ref = $1")
                .bind(playlist_ref)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
