use std::path::PathBuf;

use pulse_spotify::SpotifyError;

/// Errors from the ETL stages.
///
/// Anything recoverable (a single artist lookup, a missing sub-object,
/// an unparsable date) is absorbed inside the stage that hits it; what
/// surfaces here fails the whole stage and is safe to retry.
#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    /// The upstream API refused or dropped a request the stage cannot
    /// continue without (playlist fetch, track listing).
    #[error("Upstream API error: {0}")]
    Spotify(#[from] SpotifyError),

    /// A database error from the load stage.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Reading or writing a stage artifact failed.
    #[error("Artifact I/O error at {path}: {source}")]
    ArtifactIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A stage artifact exists but does not decode.
    #[error("Artifact decode error at {path}: {source}")]
    ArtifactDecode {
        path: PathBuf,
        source: serde_json::Error,
    },
}
