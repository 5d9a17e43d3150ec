//! Repository for the `playlist_tracks` warehouse table.
//!
//! The merge path stages the whole batch into a transaction-scoped temp
//! table, then applies one set-based `INSERT ... ON CONFLICT DO UPDATE`
//! keyed by `uq_playlist_tracks_key`. Nothing touches the live table
//! until the batch has staged completely, so a failure anywhere inside
//! the transaction leaves the store in its pre-batch state.

use pulse_core::record::PlaylistTrackRow;
use sqlx::PgPool;

use crate::models::warehouse_track::WarehouseTrack;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, playlist_id, track_id, track_name, track_duration_ms, \
    track_duration_sec, track_popularity, album_id, album_name, album_release_date, \
    album_label, release_year, artist_ids, artist_names, track_genres, loaded_at";

/// The non-generated columns, in staging/merge order.
const DATA_COLUMNS: &str = "playlist_id, track_id, track_name, track_duration_ms, \
    track_duration_sec, track_popularity, album_id, album_name, album_release_date, \
    album_label, release_year, artist_ids, artist_names, track_genres";

/// Provides the set-based merge and read access for warehouse rows.
pub struct WarehouseTrackRepo;

impl WarehouseTrackRepo {
    /// Merge a batch of rows, insert-or-full-replace per key.
    ///
    /// Callers must hand in a batch already deduplicated by
    /// `(playlist_id, track_id)` (the transformer guarantees this); a
    /// duplicate key inside one batch would make the merge statement
    /// touch the same row twice, which PostgreSQL rejects.
    ///
    /// Returns the number of rows written (inserted or replaced).
    pub async fn merge_batch(
        pool: &PgPool,
        rows: &[PlaylistTrackRow],
    ) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;

        // Stage schema mirrors the data columns of the live table,
        // including the malformed-key checks so a bad row aborts during
        // staging rather than mid-merge.
        sqlx::query(
            "CREATE TEMP TABLE playlist_tracks_stage ( \
                playlist_id         TEXT NOT NULL CHECK (playlist_id <> ''), \
                track_id            TEXT NOT NULL CHECK (track_id <> ''), \
                track_name          TEXT, \
                track_duration_ms   BIGINT, \
                track_duration_sec  DOUBLE PRECISION, \
                track_popularity    INTEGER, \
                album_id            TEXT, \
                album_name          TEXT, \
                album_release_date  DATE, \
                album_label         TEXT, \
                release_year        INTEGER, \
                artist_ids          TEXT[] NOT NULL, \
                artist_names        TEXT[] NOT NULL, \
                track_genres        TEXT[] NOT NULL \
             ) ON COMMIT DROP",
        )
        .execute(&mut *tx)
        .await?;

        let stage_insert = format!(
            "INSERT INTO playlist_tracks_stage ({DATA_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"
        );
        for row in rows {
            sqlx::query(&stage_insert)
                .bind(&row.playlist_id)
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
        }

        let result = sqlx::query(&format!(
            "INSERT INTO playlist_tracks ({DATA_COLUMNS}) \
             SELECT {DATA_COLUMNS} FROM playlist_tracks_stage \
             ON CONFLICT (playlist_id, track_id) DO UPDATE SET \
                track_name = EXCLUDED.track_name, \
                track_duration_ms = EXCLUDED.track_duration_ms, \
                track_duration_sec = EXCLUDED.track_duration_sec, \
                track_popularity = EXCLUDED.track_popularity, \
                album_id = EXCLUDED.album_id, \
                album_name = EXCLUDED.album_name, \
                album_release_date = EXCLUDED.album_release_date, \
                album_label = EXCLUDED.album_label, \
                release_year = EXCLUDED.release_year, \
                artist_ids = EXCLUDED.artist_ids, \
                artist_names = EXCLUDED.artist_names, \
                track_genres = EXCLUDED.track_genres, \
                loaded_at = now()"
        ))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(rows = result.rows_affected(), "Merged batch into playlist_tracks");
        Ok(result.rows_affected())
    }

    /// List all rows for a playlist, in insertion order.
    pub async fn list_by_playlist(
        pool: &PgPool,
        playlist_id: &str,
    ) -> Result<Vec<WarehouseTrack>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM playlist_tracks WHERE playlist_id = $1 ORDER BY id");
        sqlx::query_as::<_, WarehouseTrack>(&query)
            .bind(playlist_id)
            .fetch_all(pool)
            .await
    }

    /// Total row count across all playlists.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM playlist_tracks")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
