//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod playlist_repo;
pub mod qa_repo;
pub mod user_track_repo;
pub mod warehouse_track_repo;

pub use playlist_repo::PlaylistRepo;
pub use qa_repo::QaRepo;
pub use user_track_repo::UserTrackRepo;
pub use warehouse_track_repo::WarehouseTrackRepo;
