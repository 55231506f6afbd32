//! SQLite storage implementation for GoalGang.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `goalgang-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users, goals, the progress ledger and notifications
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! All writes go through a single writer task ([`WriteHandle`]) that runs each
//! job inside an `IMMEDIATE` transaction, which serializes read-modify-write
//! sequences such as appending to the progress ledger.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod goals;
pub mod notifications;
pub mod progress;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from goalgang-core for convenience
pub use goalgang_core::errors::{DatabaseError, Error, Result};
