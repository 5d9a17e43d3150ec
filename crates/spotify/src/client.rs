//! REST client for the Spotify Web API endpoints the pipeline consumes.
//!
//! Wraps playlist metadata retrieval, the paginated track listing, and
//! the single-artist lookup using [`reqwest`], with bearer tokens
//! supplied by [`TokenProvider`](crate::auth::TokenProvider).

use crate::auth::{TokenProvider, DEFAULT_ACCOUNTS_URL};
use crate::error::SpotifyError;
use crate::model::{ArtistObject, Page, PlaylistItem, PlaylistObject};

/// Base URL of the Spotify Web API.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Page size requested from the track-listing endpoint (the API maximum).
const TRACKS_PAGE_LIMIT: u32 = 100;

/// HTTP client for the Spotify Web API.
pub struct SpotifyClient {
    client: reqwest::Client,
    api_url: String,
    auth: TokenProvider,
}

impl SpotifyClient {
    /// Create a client against the production API and accounts service.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_urls(
            client_id,
            client_secret,
            DEFAULT_API_URL.to_string(),
            DEFAULT_ACCOUNTS_URL.to_string(),
        )
    }

    /// Create a client with explicit base URLs (used by tests to point
    /// at a local stub server).
    pub fn with_urls(
        client_id: String,
        client_secret: String,
        api_url: String,
        accounts_url: String,
    ) -> Self {
        let client = reqwest::Client::new();
        let auth = TokenProvider::new(client.clone(), accounts_url, client_id, client_secret);
        Self {
            client,
            api_url,
            auth,
        }
    }

    /// Create a client from `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self, SpotifyError> {
        let client_id = std::env::var("SPOTIFY_CLIENT_ID")
            .map_err(|_| SpotifyError::Auth("SPOTIFY_CLIENT_ID is not set".to_string()))?;
        let client_secret = std::env::var("SPOTIFY_CLIENT_SECRET")
            .map_err(|_| SpotifyError::Auth("SPOTIFY_CLIENT_SECRET is not set".to_string()))?;
        Ok(Self::new(client_id, client_secret))
    }

    /// Fetch playlist metadata (name, owner, description, images).
    pub async fn playlist(&self, playlist_id: &str) -> Result<PlaylistObject, SpotifyError> {
        self.get_json(&format!("{}/playlists/{playlist_id}", self.api_url))
            .await
    }

    /// Fetch the full track listing for a playlist, following the opaque
    /// `next` continuation URL until the final page.
    pub async fn playlist_items(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistItem>, SpotifyError> {
        let mut items = Vec::new();
        let mut url = format!(
            "{}/playlists/{playlist_id}/tracks?limit={TRACKS_PAGE_LIMIT}",
            self.api_url
        );

        loop {
            let page: Page<PlaylistItem> = self.get_json(&url).await?;
            items.extend(page.items);
            match page.next {
                Some(next) => url = next,
                None => break,
            }
        }

        tracing::debug!(playlist_id, count = items.len(), "Fetched playlist track listing");
        Ok(items)
    }

    /// Fetch a single artist's genre tags.
    ///
    /// Returns the (possibly empty) genre list; callers decide how to
    /// treat failures.
    pub async fn artist_genres(&self, artist_id: &str) -> Result<Vec<String>, SpotifyError> {
        let artist: ArtistObject = self
            .get_json(&format!("{}/artists/{artist_id}", self.api_url))
            .await?;
        Ok(artist.genres)
    }

    // ---- private helpers ----

    /// Perform an authenticated GET and decode the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, SpotifyError> {
        let token = self.auth.bearer_token().await?;
        let response = self.client.get(url).bearer_auth(token).send().await?;
        let response = Self::ensure_success(response).await?;
        response.json().await.map_err(SpotifyError::Request)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`SpotifyError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SpotifyError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SpotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Extract a bare playlist id from an opaque playlist reference.
///
/// Accepts either a bare id or a shared `open.spotify.com` URL; trailing
/// query parameters (`?si=...`) are stripped.
pub fn parse_playlist_ref(reference: &str) -> String {
    let trimmed = reference.trim();
    let last_segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
    last_segment
        .split('?')
        .next()
        .unwrap_or(last_segment)
        .to_string()
}
