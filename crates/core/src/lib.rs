//! Pure domain logic for the playlist ETL pipeline.
//!
//! Everything in this crate is I/O-free: record shapes, type coercion,
//! and the dashboard aggregations. Network and database concerns live in
//! `pulse-spotify`, `pulse-etl`, and `pulse-db`.

pub mod aggregate;
pub mod coerce;
pub mod error;
pub mod record;
pub mod types;
