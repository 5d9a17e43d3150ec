//! Handlers for the `/playlists` resource.
//!
//! The analyze endpoint is the interactive trigger: it runs the same
//! extract/transform/load core as the batch orchestrator, but merges
//! into the caller's per-user store. The dashboard endpoint aggregates
//! what was loaded.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pulse_core::aggregate::{top_artists, top_genres, NameCount};
use pulse_core::error::CoreError;
use pulse_core::record::PlaylistTrackRow;
use pulse_db::models::Playlist;
use pulse_db::repositories::{PlaylistRepo, UserTrackRepo};
use pulse_etl::stages;
use pulse_spotify::client::parse_playlist_ref;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::user::CurrentUser;

/// How many top artists/genres the dashboard reports.
const DASHBOARD_TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Request/response shapes
// ---------------------------------------------------------------------------

/// Body of the analyze trigger: one opaque playlist reference.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Bare playlist id or an `open.spotify.com` share URL.
    pub reference: String,
}

/// Result of a completed analysis.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub playlist: Playlist,
    pub tracks_loaded: u64,
    pub tracks_rejected: usize,
}

/// One row of the dashboard's track table.
#[derive(Debug, PartialEq, Serialize)]
pub struct TrackSummary {
    pub track_name: Option<String>,
    pub artist_names: Vec<String>,
    pub album_name: Option<String>,
    pub track_popularity: Option<i32>,
    pub track_duration_sec: Option<f64>,
    pub track_genres: Vec<String>,
}

/// Aggregated view of one analyzed playlist.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub playlist_name: Option<String>,
    pub playlist_owner: Option<String>,
    pub track_count: usize,
    pub top_artists: Vec<NameCount>,
    pub top_genres: Vec<NameCount>,
    pub tracks: Vec<TrackSummary>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/playlists/analyze
///
/// Run the full pipeline for the referenced playlist and merge the
/// result into the caller's store. Re-analyzing is always safe: the
/// loader updates rows in place.
pub async fn analyze(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<AnalyzeRequest>,
) -> AppResult<impl IntoResponse> {
    let playlist_id = parse_playlist_ref(&request.reference);
    if playlist_id.is_empty() {
        return Err(AppError::BadRequest("empty playlist reference".to_string()));
    }

    let outcome = stages::analyze_for_user(
        &state.pool,
        &state.spotify,
        user.0,
        &playlist_id,
        state.config.genre_lookup_delay,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AnalyzeResponse {
                playlist: outcome.playlist,
                tracks_loaded: outcome.rows_written,
                tracks_rejected: outcome.rejected,
            },
        }),
    ))
}

/// GET /api/v1/playlists
///
/// List the caller's analyzed playlists, most recent first.
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let playlists = PlaylistRepo::list_for_user(&state.pool, user.0).await?;
    Ok(Json(DataResponse { data: playlists }))
}

/// GET /api/v1/playlists/{playlist_id}/dashboard
///
/// Aggregate the caller's loaded rows for one playlist.
pub async fn dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(playlist_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let playlist = PlaylistRepo::find_for_user(&state.pool, user.0, &playlist_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Playlist",
            id: playlist_id.clone(),
        }))?;

    let rows: Vec<PlaylistTrackRow> = UserTrackRepo::list_by_playlist(&state.pool, playlist.id)
        .await?
        .into_iter()
        .map(|t| t.into_row(&playlist.spotify_playlist_id))
        .collect();

    if rows.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Tracks for playlist",
            id: playlist_id,
        }));
    }

    Ok(Json(DataResponse {
        data: build_dashboard(&playlist, rows),
    }))
}

/// Assemble the dashboard payload from loaded rows.
fn build_dashboard(playlist: &Playlist, rows: Vec<PlaylistTrackRow>) -> DashboardResponse {
    let top_artists = top_artists(&rows, DASHBOARD_TOP_N);
    let top_genres = top_genres(&rows, DASHBOARD_TOP_N);

    let tracks: Vec<TrackSummary> = rows
        .into_iter()
        .map(|row| TrackSummary {
            track_name: row.track_name,
            artist_names: row.artist_names,
            album_name: row.album_name,
            track_popularity: row.track_popularity,
            track_duration_sec: row.track_duration_sec,
            track_genres: row.track_genres,
        })
        .collect();

    DashboardResponse {
        playlist_name: playlist.name.clone(),
        playlist_owner: playlist.owner.clone(),
        track_count: tracks.len(),
        top_artists,
        top_genres,
        tracks,
    }
}
