//! Progress ledger repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::progress_model::{GoalUpdate, NewGoalUpdate, ProgressOutcome, ProgressSubmission};
use crate::errors::Result;

/// Persistence contract for the append-only progress ledger.
#[async_trait]
pub trait ProgressRepositoryTrait: Send + Sync {
    /// Appends one ledger entry and stores the re-evaluated goal.
    ///
    /// The goal is read, the entry inserted and the goal written back in a
    /// single serialized write transaction (see [`NewGoalUpdate::apply_to`]),
    /// so concurrent appends to the same goal cannot lose an increment.
    /// Fails with a not-found error when the goal is missing or is not owned
    /// by `new_update.user_id`; nothing is written in that case.
    async fn append_update(
        &self,
        new_update: NewGoalUpdate,
        now: NaiveDateTime,
    ) -> Result<ProgressOutcome>;

    /// Ledger of a goal, newest entry first.
    fn list_updates(&self, goal_id: &str) -> Result<Vec<GoalUpdate>>;
}

/// Progress recording exposed to the API layer.
#[async_trait]
pub trait ProgressServiceTrait: Send + Sync {
    /// Validates and records a progress submission, then emits the domain
    /// event for any status transition it caused.
    async fn record_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        submission: ProgressSubmission,
    ) -> Result<ProgressOutcome>;

    /// Ledger of a goal owned by `user_id`, newest entry first.
    fn list_updates(&self, user_id: &str, goal_id: &str) -> Result<Vec<GoalUpdate>>;
}
