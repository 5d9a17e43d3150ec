//! The UPSERT loader contract and its two store adapters.
//!
//! Both adapters accept a batch of transformed rows and merge them into
//! their store such that:
//!
//! - at most one row exists per `(playlist_id, track_id)` afterwards;
//! - an existing row is fully replaced per column, an incoming null
//!   overwriting a stored value;
//! - the batch applies atomically -- a mid-batch failure leaves the
//!   store in its pre-batch state;
//! - applying the same batch twice leaves the store content-identical
//!   to applying it once (`loaded_at` bookkeeping aside).
//!
//! Concurrent loads against the same key range are serialized by the
//! store's uniqueness constraint, not by anything here: each adapter
//! issues its merge inside a single transaction and lets row-level
//! locking do the rest. Retries after a failed batch are therefore
//! always safe.

use async_trait::async_trait;
use pulse_core::record::PlaylistTrackRow;
use pulse_core::types::DbId;
use sqlx::PgPool;

use crate::repositories::{UserTrackRepo, WarehouseTrackRepo};

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Rows written (inserted or replaced).
    pub rows_written: u64,
}

/// A store that can absorb a batch of playlist track rows.
///
/// Selected by caller context: the warehouse adapter for scheduled
/// batch loads, the per-playlist adapter for interactive analyses. Both
/// satisfy the same merge guarantees and the same property suite.
#[async_trait]
pub trait TrackLoader: Send + Sync {
    async fn load(
        &self,
        pool: &PgPool,
        rows: &[PlaylistTrackRow],
    ) -> Result<LoadSummary, sqlx::Error>;
}

/// Set-based realization: staged temp table plus one server-side merge
/// statement. Preferred for warehouse-scale batches.
pub struct WarehouseLoader;

#[async_trait]
impl TrackLoader for WarehouseLoader {
    async fn load(
        &self,
        pool: &PgPool,
        rows: &[PlaylistTrackRow],
    ) -> Result<LoadSummary, sqlx::Error> {
        let rows_written = WarehouseTrackRepo::merge_batch(pool, rows).await?;
        Ok(LoadSummary { rows_written })
    }
}

/// Per-row realization: lookup-by-key then update-or-insert under a
/// per-batch transaction. Preferred for small interactive loads.
pub struct UserPlaylistLoader {
    /// The owning `playlists.id`; carries the user scoping.
    pub playlist_ref: DbId,
}

#[async_trait]
impl TrackLoader for UserPlaylistLoader {
    async fn load(
        &self,
        pool: &PgPool,
        rows: &[PlaylistTrackRow],
    ) -> Result<LoadSummary, sqlx::Error> {
        let rows_written = UserTrackRepo::merge_batch(pool, self.playlist_ref, rows).await?;
        Ok(LoadSummary { rows_written })
    }
}
