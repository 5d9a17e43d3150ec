//! Repository for the per-user `playlists` table.

use pulse_core::record::PlaylistMeta;
use pulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::playlist::Playlist;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, spotify_playlist_id, name, owner, description, \
    image_url, created_at, updated_at";

/// Provides data access for a user's analyzed playlists.
pub struct PlaylistRepo;

impl PlaylistRepo {
    /// Upsert the playlist row for a user, refreshing its metadata.
    ///
    /// Uses `ON CONFLICT (user_id, spotify_playlist_id) DO UPDATE` so a
    /// re-analysis updates the stored name/owner/description in place.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        meta: &PlaylistMeta,
    ) -> Result<Playlist, sqlx::Error> {
        let query = format!(
            "INSERT INTO playlists (user_id, spotify_playlist_id, name, owner, description, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id, spotify_playlist_id) DO UPDATE SET \
                name = EXCLUDED.name, \
                owner = EXCLUDED.owner, \
                description = EXCLUDED.description, \
                image_url = EXCLUDED.image_url, \
                updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(user_id)
            .bind(&meta.playlist_id)
            .bind(&meta.name)
            .bind(&meta.owner)
            .bind(&meta.description)
            .bind(&meta.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a user's playlist row by its upstream playlist id.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        spotify_playlist_id: &str,
    ) -> Result<Option<Playlist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM playlists \
             WHERE user_id = $1 AND spotify_playlist_id = $2"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(user_id)
            .bind(spotify_playlist_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's playlists, most recently analyzed first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Playlist>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM playlists WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Playlist>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
