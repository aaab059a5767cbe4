//! Postgres implementation of the refbook storage port.
//!
//! All SQL is runtime-checked (sqlx::query, not sqlx::query!) so the crate
//! builds without a live database. Integrity invariants — unique codes,
//! unique version labels and effective dates per refbook, protected
//! deletes — are enforced by the schema itself.

pub mod schema;
mod sqlx_types;
mod store;

pub use store::PgRefbookStore;
