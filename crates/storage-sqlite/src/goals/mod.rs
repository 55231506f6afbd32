//! SQLite storage implementation for goals.

mod model;
pub(crate) mod repository;

pub(crate) use model::parse_decimal;
pub use model::GoalDB;
pub use repository::GoalRepository;
