//! Quality-check queries over the warehouse table.
//!
//! Read-only diagnostics. Suspect data (non-positive durations,
//! missing names) passes the load layer untouched and is only
//! surfaced here.

use sqlx::PgPool;

use crate::models::qa::QaReport;

/// Runs the data-quality queries.
pub struct QaRepo;

impl QaRepo {
    /// Build a [`QaReport`] over the entire warehouse table.
    pub async fn report(pool: &PgPool) -> Result<QaReport, sqlx::Error> {
        let (total_rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM playlist_tracks")
            .fetch_one(pool)
            .await?;

        let (duplicate_keys,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM ( \
                SELECT playlist_id, track_id FROM playlist_tracks \
                GROUP BY playlist_id, track_id HAVING COUNT(*) > 1 \
             ) duplicates",
        )
        .fetch_one(pool)
        .await?;

        let (missing_track_names,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM playlist_tracks \
             WHERE track_name IS NULL OR track_name = ''",
        )
        .fetch_one(pool)
        .await?;

        let (non_positive_durations,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM playlist_tracks \
             WHERE track_duration_ms IS NOT NULL AND track_duration_ms <= 0",
        )
        .fetch_one(pool)
        .await?;

        let (popularity_out_of_range,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM playlist_tracks \
             WHERE track_popularity IS NOT NULL \
               AND (track_popularity < 0 OR track_popularity > 100)",
        )
        .fetch_one(pool)
        .await?;

        let (rows_without_genres,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM playlist_tracks WHERE cardinality(track_genres) = 0",
        )
        .fetch_one(pool)
        .await?;

        Ok(QaReport {
            total_rows,
            duplicate_keys,
            missing_track_names,
            non_positive_durations,
            popularity_out_of_range,
            rows_without_genres,
        })
    }
}
