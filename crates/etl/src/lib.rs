//! The extract/transform/load core.
//!
//! Shared by the batch orchestrator (`pulse-worker`) and the web front
//! end (`pulse-api`): normalization of raw playlist entries, batch
//! genre enrichment, the batch transformer, stage artifacts, and the
//! stage functions that wire them to the stores in `pulse-db`.

pub mod artifact;
pub mod enrich;
pub mod error;
pub mod normalize;
pub mod stages;
pub mod transform;

pub use error::EtlError;
