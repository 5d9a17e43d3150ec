//! Client-credentials token flow for the Spotify accounts service.
//!
//! [`TokenProvider`] fetches a bearer token on first use and caches it
//! behind a mutex, refreshing once the token is within the expiry
//! margin. Callers just ask for a token; the refresh is invisible.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::error::SpotifyError;
use crate::model::TokenResponse;

/// Base URL of the Spotify accounts service.
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Tokens are refreshed this many seconds before their reported expiry,
/// so a token handed out is always valid for the request that follows.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// A cached bearer token with its refresh deadline.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    refresh_after: DateTime<Utc>,
}

/// Fetches and caches client-credentials tokens.
pub struct TokenProvider {
    client: reqwest::Client,
    accounts_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    /// Create a provider for the given application credentials.
    ///
    /// * `accounts_url` - accounts service base URL, normally
    ///   [`DEFAULT_ACCOUNTS_URL`]; overridable for tests.
    pub fn new(
        client: reqwest::Client,
        accounts_url: String,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self {
            client,
            accounts_url,
            client_id,
            client_secret,
            cached: Mutex::new(None),
        }
    }

    /// Return a valid bearer token, fetching or refreshing as needed.
    pub async fn bearer_token(&self) -> Result<String, SpotifyError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if Utc::now() < token.refresh_after {
                return Ok(token.access_token.clone());
            }
        }

        let response = self.fetch_token().await?;
        let token = CachedToken {
            access_token: response.access_token.clone(),
            refresh_after: refresh_deadline(Utc::now(), response.expires_in),
        };
        tracing::debug!(expires_in = response.expires_in, "Fetched Spotify access token");
        *cached = Some(token);
        Ok(response.access_token)
    }

    /// POST the client-credentials grant to the accounts service.
    async fn fetch_token(&self) -> Result<TokenResponse, SpotifyError> {
        let response = self
            .client
            .post(format!("{}/api/token", self.accounts_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SpotifyError::Auth(format!(
                "token request failed ({}): {body}",
                status.as_u16()
            )));
        }

        response.json().await.map_err(SpotifyError::Request)
    }
}

/// Compute the moment a token fetched at `now` should be refreshed.
fn refresh_deadline(now: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    now + Duration::seconds((expires_in - EXPIRY_MARGIN_SECS).max(0))
}
