//! GoalGang Core - Domain entities, services, and traits.
//!
//! This crate contains the goal tracking business logic: the progress
//! ledger, the goal state evaluator and the notifications it drives.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod errors;
pub mod events;
pub mod goals;
pub mod notifications;
pub mod progress;
pub mod users;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
