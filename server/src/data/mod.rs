//! Data layer
//!
//! SQLite-backed persistence for the tournament store plus the shared
//! row types the rest of the crate consumes.

pub mod sqlite;
pub mod types;

pub use sqlite::{SqliteError, SqlitePool, SqliteService};
