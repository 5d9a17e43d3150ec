//! Route tables.

pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::playlists;
use crate::state::AppState;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/playlists", get(playlists::list))
        .route("/playlists/analyze", post(playlists::analyze))
        .route("/playlists/{playlist_id}/dashboard", get(playlists::dashboard))
}
