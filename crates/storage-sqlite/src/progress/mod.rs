//! SQLite storage implementation for the progress ledger.

mod model;
mod repository;

pub use model::GoalUpdateDB;
pub use repository::ProgressRepository;
