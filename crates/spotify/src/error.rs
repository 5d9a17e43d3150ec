/// Errors from the Spotify Web API layer.
#[derive(Debug, thiserror::Error)]
pub enum SpotifyError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Spotify returned a non-2xx status code.
    #[error("Spotify API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Token acquisition failed or credentials are missing.
    #[error("Authentication error: {0}")]
    Auth(String),
}
