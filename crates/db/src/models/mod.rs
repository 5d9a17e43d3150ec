//! Row models for the persisted tables.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row; write input arrives as
//! [`pulse_core::record::PlaylistTrackRow`] rather than per-table DTOs,
//! since both stores persist the same logical shape.

pub mod playlist;
pub mod qa;
pub mod user_track;
pub mod warehouse_track;

pub use playlist::Playlist;
pub use qa::QaReport;
pub use user_track::UserTrack;
pub use warehouse_track::WarehouseTrack;
