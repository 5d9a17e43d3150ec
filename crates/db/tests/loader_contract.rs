//! Integration tests for the UPSERT loader contract.
//!
//! Exercises both store adapters against a real database:
//! - fresh load into an empty store
//! - update via re-load (same key, changed columns)
//! - idempotence verified field-by-field, not by row count
//! - key uniqueness across interleaved loads
//! - rollback on a poison row (store left in pre-batch state)
//! - incoming null overwriting a stored value

use chrono::NaiveDate;
use pulse_core::record::{PlaylistMeta, PlaylistTrackRow};
use pulse_db::loader::{TrackLoader, UserPlaylistLoader, WarehouseLoader};
use pulse_db::repositories::{PlaylistRepo, QaRepo, UserTrackRepo, WarehouseTrackRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn row(playlist_id: &str, track_id: &str, name: &str) -> PlaylistTrackRow {
    PlaylistTrackRow {
        playlist_id: playlist_id.to_string(),
        track_id: track_id.to_string(),
        track_name: Some(name.to_string()),
        track_duration_ms: Some(200_000),
        track_duration_sec: Some(200.0),
        track_popularity: Some(80),
        album_id: Some("album1".to_string()),
        album_name: Some("Album One".to_string()),
        album_release_date: NaiveDate::from_ymd_opt(2023, 1, 15),
        album_label: Some("Label".to_string()),
        release_year: Some(2023),
        artist_ids: vec!["ar1".to_string(), "ar2".to_string()],
        artist_names: vec!["Artist 1".to_string(), "Artist 2".to_string()],
        track_genres: vec!["pop".to_string(), "rock".to_string()],
    }
}

fn meta(playlist_id: &str) -> PlaylistMeta {
    PlaylistMeta {
        playlist_id: playlist_id.to_string(),
        name: Some("Road Trip".to_string()),
        owner: Some("someone".to_string()),
        description: None,
        image_url: None,
    }
}

async fn warehouse_rows(pool: &PgPool, playlist_id: &str) -> Vec<PlaylistTrackRow> {
    WarehouseTrackRepo::list_by_playlist(pool, playlist_id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.into_row())
        .collect()
}

async fn user_rows(pool: &PgPool, playlist_ref: i64, playlist_id: &str) -> Vec<PlaylistTrackRow> {
    UserTrackRepo::list_by_playlist(pool, playlist_ref)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.into_row(playlist_id))
        .collect()
}

// ---------------------------------------------------------------------------
// Warehouse adapter (set-based merge)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn warehouse_fresh_load_writes_exact_rows(pool: PgPool) {
    let batch = vec![row("p1", "t1", "A"), row("p1", "t2", "B")];
    let summary = WarehouseLoader.load(&pool, &batch).await.unwrap();
    assert_eq!(summary.rows_written, 2);

    let stored = warehouse_rows(&pool, "p1").await;
    assert_eq!(stored, batch);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn warehouse_reload_updates_in_place(pool: PgPool) {
    WarehouseLoader.load(&pool, &[row("p1", "t1", "A")]).await.unwrap();
    WarehouseLoader.load(&pool, &[row("p1", "t1", "B")]).await.unwrap();

    let stored = warehouse_rows(&pool, "p1").await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].track_name.as_deref(), Some("B"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn warehouse_load_twice_is_idempotent(pool: PgPool) {
    let batch = vec![row("p1", "t1", "A"), row("p1", "t2", "B")];

    WarehouseLoader.load(&pool, &batch).await.unwrap();
    let first = warehouse_rows(&pool, "p1").await;

    WarehouseLoader.load(&pool, &batch).await.unwrap();
    let second = warehouse_rows(&pool, "p1").await;

    // Field-by-field, not just row count.
    assert_eq!(first, second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn warehouse_keys_stay_unique_across_interleaved_loads(pool: PgPool) {
    WarehouseLoader
        .load(&pool, &[row("p1", "t1", "A"), row("p1", "t2", "B")])
        .await
        .unwrap();
    WarehouseLoader
        .load(&pool, &[row("p1", "t2", "B2"), row("p1", "t3", "C")])
        .await
        .unwrap();

    assert_eq!(WarehouseTrackRepo::count(&pool).await.unwrap(), 3);
    let report = QaRepo::report(&pool).await.unwrap();
    assert_eq!(report.duplicate_keys, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn warehouse_incoming_null_overwrites_value(pool: PgPool) {
    WarehouseLoader.load(&pool, &[row("p1", "t1", "A")]).await.unwrap();

    let mut resend = row("p1", "t1", "A");
    resend.album_label = None;
    resend.track_popularity = None;
    WarehouseLoader.load(&pool, &[resend]).await.unwrap();

    let stored = warehouse_rows(&pool, "p1").await;
    assert_eq!(stored[0].album_label, None);
    assert_eq!(stored[0].track_popularity, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn warehouse_poison_row_rolls_back_whole_batch(pool: PgPool) {
    // Pre-existing state that the failed batch must not disturb.
    WarehouseLoader.load(&pool, &[row("p1", "t1", "A")]).await.unwrap();
    let before = warehouse_rows(&pool, "p1").await;

    // Second row has a malformed key; staging rejects it after the first
    // row has already staged.
    let poison = vec![row("p1", "t1", "CHANGED"), row("p1", "", "bad")];
    let result = WarehouseLoader.load(&pool, &poison).await;
    assert!(result.is_err());

    // Neither the new row nor the t1 update survived.
    let after = warehouse_rows(&pool, "p1").await;
    assert_eq!(before, after);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn warehouse_empty_batch_is_a_no_op(pool: PgPool) {
    let summary = WarehouseLoader.load(&pool, &[]).await.unwrap();
    assert_eq!(summary.rows_written, 0);
    assert_eq!(WarehouseTrackRepo::count(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Per-user adapter (lookup-then-write)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_fresh_load_writes_exact_rows(pool: PgPool) {
    let playlist = PlaylistRepo::upsert(&pool, 7, &meta("p1")).await.unwrap();
    let loader = UserPlaylistLoader { playlist_ref: playlist.id };

    let batch = vec![row("p1", "t1", "A"), row("p1", "t2", "B")];
    let summary = loader.load(&pool, &batch).await.unwrap();
    assert_eq!(summary.rows_written, 2);

    let stored = user_rows(&pool, playlist.id, "p1").await;
    assert_eq!(stored, batch);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_reload_updates_in_place(pool: PgPool) {
    let playlist = PlaylistRepo::upsert(&pool, 7, &meta("p1")).await.unwrap();
    let loader = UserPlaylistLoader { playlist_ref: playlist.id };

    loader.load(&pool, &[row("p1", "t1", "A")]).await.unwrap();
    loader.load(&pool, &[row("p1", "t1", "B")]).await.unwrap();

    let stored = user_rows(&pool, playlist.id, "p1").await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].track_name.as_deref(), Some("B"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_load_twice_is_idempotent(pool: PgPool) {
    let playlist = PlaylistRepo::upsert(&pool, 7, &meta("p1")).await.unwrap();
    let loader = UserPlaylistLoader { playlist_ref: playlist.id };
    let batch = vec![row("p1", "t1", "A"), row("p1", "t2", "B")];

    loader.load(&pool, &batch).await.unwrap();
    let first = user_rows(&pool, playlist.id, "p1").await;

    loader.load(&pool, &batch).await.unwrap();
    let second = user_rows(&pool, playlist.id, "p1").await;

    assert_eq!(first, second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_incoming_null_overwrites_value(pool: PgPool) {
    let playlist = PlaylistRepo::upsert(&pool, 7, &meta("p1")).await.unwrap();
    let loader = UserPlaylistLoader { playlist_ref: playlist.id };

    loader.load(&pool, &[row("p1", "t1", "A")]).await.unwrap();

    let mut resend = row("p1", "t1", "A");
    resend.album_release_date = None;
    loader.load(&pool, &[resend]).await.unwrap();

    let stored = user_rows(&pool, playlist.id, "p1").await;
    assert_eq!(stored[0].album_release_date, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_poison_row_rolls_back_whole_batch(pool: PgPool) {
    let playlist = PlaylistRepo::upsert(&pool, 7, &meta("p1")).await.unwrap();
    let loader = UserPlaylistLoader { playlist_ref: playlist.id };

    loader.load(&pool, &[row("p1", "t1", "A")]).await.unwrap();
    let before = user_rows(&pool, playlist.id, "p1").await;

    let poison = vec![row("p1", "t1", "CHANGED"), row("p1", "", "bad")];
    let result = loader.load(&pool, &poison).await;
    assert!(result.is_err());

    let after = user_rows(&pool, playlist.id, "p1").await;
    assert_eq!(before, after);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_stores_are_isolated_per_user(pool: PgPool) {
    // The same upstream playlist analyzed by two users lives in two
    // independent merge targets.
    let first = PlaylistRepo::upsert(&pool, 1, &meta("p1")).await.unwrap();
    let second = PlaylistRepo::upsert(&pool, 2, &meta("p1")).await.unwrap();
    assert_ne!(first.id, second.id);

    UserPlaylistLoader { playlist_ref: first.id }
        .load(&pool, &[row("p1", "t1", "A")])
        .await
        .unwrap();

    assert_eq!(UserTrackRepo::count_by_playlist(&pool, first.id).await.unwrap(), 1);
    assert_eq!(UserTrackRepo::count_by_playlist(&pool, second.id).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Playlist metadata upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn playlist_upsert_refreshes_metadata_in_place(pool: PgPool) {
    let first = PlaylistRepo::upsert(&pool, 7, &meta("p1")).await.unwrap();

    let mut renamed = meta("p1");
    renamed.name = Some("Renamed".to_string());
    let second = PlaylistRepo::upsert(&pool, 7, &renamed).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.name.as_deref(), Some("Renamed"));

    let listed = PlaylistRepo::list_for_user(&pool, 7).await.unwrap();
    assert_eq!(listed.len(), 1);
}

// ---------------------------------------------------------------------------
// Quality report
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn qa_report_flags_suspect_rows_without_rejecting_them(pool: PgPool) {
    let mut suspect = row("p1", "t1", "A");
    suspect.track_duration_ms = Some(0);
    suspect.track_duration_sec = Some(0.0);

    let mut nameless = row("p1", "t2", "unused");
    nameless.track_name = None;
    nameless.track_genres = Vec::new();

    WarehouseLoader.load(&pool, &[suspect, nameless]).await.unwrap();

    let report = QaRepo::report(&pool).await.unwrap();
    assert_eq!(report.total_rows, 2);
    assert_eq!(report.duplicate_keys, 0);
    assert_eq!(report.non_positive_durations, 1);
    assert_eq!(report.missing_track_names, 1);
    assert_eq!(report.rows_without_genres, 1);
    assert_eq!(report.popularity_out_of_range, 0);
}
