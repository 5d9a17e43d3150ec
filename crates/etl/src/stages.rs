//! The three pipeline stages and the two caller paths.
//!
//! Each stage is independently runnable and idempotent with respect to
//! its own output artifact. The batch path (`pulse-worker`) runs them
//! against the warehouse store via the file artifacts; the interactive
//! path (`pulse-api`) runs the same core in memory against a user's
//! store.

use std::path::{Path, PathBuf};
use std::time::Duration;

use pulse_core::record::PlaylistMeta;
use pulse_core::types::DbId;
use pulse_db::loader::{LoadSummary, TrackLoader, UserPlaylistLoader, WarehouseLoader};
use pulse_db::models::Playlist;
use pulse_db::repositories::PlaylistRepo;
use pulse_db::DbPool;
use pulse_spotify::SpotifyClient;

use crate::artifact;
use crate::enrich::GenreEnricher;
use crate::error::EtlError;
use crate::normalize::{normalize_items, normalize_playlist};
use crate::transform::{transform_batch, TransformOutcome};

/// Outcome of the extract stage.
#[derive(Debug)]
pub struct ExtractSummary {
    pub meta: PlaylistMeta,
    pub records: usize,
    pub artifact: PathBuf,
}

/// Outcome of the transform stage.
#[derive(Debug)]
pub struct TransformSummary {
    pub rows: usize,
    pub rejected: usize,
    pub duplicates: usize,
    pub artifact: PathBuf,
}

/// Outcome of an interactive per-user analysis.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub playlist: Playlist,
    pub rows_written: u64,
    pub rejected: usize,
}

/// Extract: fetch the playlist, normalize every entry, enrich genres,
/// and overwrite the raw artifact.
pub async fn extract_stage(
    client: &SpotifyClient,
    playlist_id: &str,
    data_dir: &Path,
    lookup_delay: Duration,
) -> Result<ExtractSummary, EtlError> {
    let playlist = client.playlist(playlist_id).await?;
    let meta = normalize_playlist(&playlist);

    let items = client.playlist_items(playlist_id).await?;
    let mut records = normalize_items(playlist_id, &items);

    GenreEnricher::with_delay(client, lookup_delay)
        .enrich(&mut records)
        .await;

    let artifact = artifact::write_raw(data_dir, playlist_id, &records)?;
    tracing::info!(playlist_id, tracks = records.len(), "Extract stage complete");

    Ok(ExtractSummary {
        meta,
        records: records.len(),
        artifact,
    })
}

/// Transform: read the raw artifact, coerce/dedup/validate, overwrite
/// the cleaned artifact.
pub fn transform_stage(playlist_id: &str, data_dir: &Path) -> Result<TransformSummary, EtlError> {
    let records = artifact::read_raw(data_dir, playlist_id)?;
    let TransformOutcome {
        rows,
        rejected,
        duplicates,
    } = transform_batch(records);

    let artifact = artifact::write_cleaned(data_dir, playlist_id, &rows)?;
    tracing::info!(
        playlist_id,
        rows = rows.len(),
        rejected,
        duplicates,
        "Transform stage complete"
    );

    Ok(TransformSummary {
        rows: rows.len(),
        rejected,
        duplicates,
        artifact,
    })
}

/// Load: read the cleaned artifact and merge it into the warehouse
/// store. Safe to retry; the loader is idempotent.
pub async fn load_stage(
    pool: &DbPool,
    playlist_id: &str,
    data_dir: &Path,
) -> Result<LoadSummary, EtlError> {
    let rows = artifact::read_cleaned(data_dir, playlist_id)?;
    let summary = WarehouseLoader.load(pool, &rows).await?;
    tracing::info!(playlist_id, rows = summary.rows_written, "Load stage complete");
    Ok(summary)
}

/// The scheduled batch path: extract, transform, load, in order.
pub async fn run_all(
    pool: &DbPool,
    client: &SpotifyClient,
    playlist_id: &str,
    data_dir: &Path,
    lookup_delay: Duration,
) -> Result<LoadSummary, EtlError> {
    extract_stage(client, playlist_id, data_dir, lookup_delay).await?;
    transform_stage(playlist_id, data_dir)?;
    load_stage(pool, playlist_id, data_dir).await
}

/// The interactive path: run the same core in memory and merge into the
/// caller's per-user store, refreshing the playlist metadata row.
pub async fn analyze_for_user(
    pool: &DbPool,
    client: &SpotifyClient,
    user_id: DbId,
    playlist_id: &str,
    lookup_delay: Duration,
) -> Result<AnalysisOutcome, EtlError> {
    let playlist = client.playlist(playlist_id).await?;
    let meta = normalize_playlist(&playlist);

    let items = client.playlist_items(playlist_id).await?;
    let mut records = normalize_items(playlist_id, &items);

    GenreEnricher::with_delay(client, lookup_delay)
        .enrich(&mut records)
        .await;

    let outcome = transform_batch(records);

    let playlist_row = PlaylistRepo::upsert(pool, user_id, &meta).await?;
    let summary = UserPlaylistLoader {
        playlist_ref: playlist_row.id,
    }
    .load(pool, &outcome.rows)
    .await?;

    tracing::info!(
        user_id,
        playlist_id,
        rows = summary.rows_written,
        rejected = outcome.rejected,
        "Interactive analysis complete"
    );

    Ok(AnalysisOutcome {
        playlist: playlist_row,
        rows_written: summary.rows_written,
        rejected: outcome.rejected,
    })
}
