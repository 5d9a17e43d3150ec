//! HTTP client for the Spotify Web API.
//!
//! Covers exactly the three upstream surfaces the pipeline consumes:
//! playlist metadata, paginated playlist tracks, and per-artist genre
//! lookup, plus the client-credentials token flow that authenticates
//! them. Rate limiting across artist lookups is the enricher's concern
//! (`pulse-etl`), not this crate's.

pub mod auth;
pub mod client;
pub mod error;
pub mod model;

pub use client::SpotifyClient;
pub use error::SpotifyError;
