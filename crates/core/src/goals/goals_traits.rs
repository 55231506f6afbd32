//! Goal repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::goals_model::{
    Goal, GoalEdit, GoalEditOutcome, GoalFilter, GoalSummary, GoalWithUpdates, NewGoal,
};
use crate::errors::Result;

/// Persistence contract for goals.
///
/// Every lookup is scoped to the owning user: a goal owned by someone else
/// is reported exactly like a missing one.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Inserts a fully built goal.
    async fn insert_goal(&self, goal: Goal) -> Result<Goal>;

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;

    /// Lists the user's goals matching `filter`, newest first.
    fn list_goals(&self, user_id: &str, filter: &GoalFilter) -> Result<Vec<Goal>>;

    /// Loads the goal, applies `edit` with [`GoalEdit::apply_to`] and writes
    /// the result, all inside one write transaction.
    async fn edit_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        edit: GoalEdit,
        now: NaiveDateTime,
    ) -> Result<GoalEditOutcome>;

    /// Deletes the goal and its ledger. Returns the number of deleted goals.
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize>;
}

/// Goal management operations exposed to the API layer.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;

    /// Returns the goal with its ledger, newest entry first.
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalWithUpdates>;

    fn list_goals(&self, user_id: &str, filter: &GoalFilter) -> Result<Vec<Goal>>;

    /// Edits descriptive fields or the target. A lowered target may complete
    /// the goal, in which case the matching event is emitted.
    async fn update_goal(&self, user_id: &str, goal_id: &str, edit: GoalEdit) -> Result<Goal>;

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;

    fn get_summary(&self, user_id: &str) -> Result<GoalSummary>;
}
