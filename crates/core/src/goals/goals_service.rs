use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use super::goals_model::{Goal, GoalEdit, GoalFilter, GoalSummary, GoalWithUpdates, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};
use crate::progress::ProgressRepositoryTrait;

pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
    progress_repository: Arc<dyn ProgressRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl GoalService {
    pub fn new(
        repository: Arc<dyn GoalRepositoryTrait>,
        progress_repository: Arc<dyn ProgressRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            progress_repository,
            event_sink,
        }
    }
}

#[async_trait::async_trait]
impl GoalServiceTrait for GoalService {
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let now = Utc::now().naive_utc();
        new_goal.validate(now.date())?;

        let goal = new_goal.into_goal(Uuid::new_v4().to_string(), user_id, now);
        debug!("Creating goal '{}' for user {}", goal.title, user_id);
        self.repository.insert_goal(goal).await
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalWithUpdates> {
        let goal = self.repository.get_goal(user_id, goal_id)?;
        let updates = self.progress_repository.list_updates(&goal.id)?;
        Ok(GoalWithUpdates { goal, updates })
    }

    fn list_goals(&self, user_id: &str, filter: &GoalFilter) -> Result<Vec<Goal>> {
        self.repository.list_goals(user_id, filter)
    }

    async fn update_goal(&self, user_id: &str, goal_id: &str, edit: GoalEdit) -> Result<Goal> {
        if edit.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "No goal fields to update".to_string(),
            )));
        }

        let now = Utc::now().naive_utc();
        let outcome = self
            .repository
            .edit_goal(user_id, goal_id, edit, now)
            .await?;

        if let Some(transition) = outcome.transition {
            info!(
                "Goal {} changed status after edit: {:?}",
                outcome.goal.id, transition
            );
            self.event_sink
                .emit(DomainEvent::from_transition(&outcome.goal, transition));
        }
        Ok(outcome.goal)
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        let deleted = self.repository.delete_goal(user_id, goal_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound("Goal".to_string()));
        }
        Ok(())
    }

    fn get_summary(&self, user_id: &str) -> Result<GoalSummary> {
        let goals = self
            .repository
            .list_goals(user_id, &GoalFilter::default())?;
        Ok(GoalSummary::from_goals(&goals))
    }
}
