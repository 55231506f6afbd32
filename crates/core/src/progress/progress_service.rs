use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use super::progress_model::{GoalUpdate, ProgressOutcome, ProgressSubmission};
use super::progress_traits::{ProgressRepositoryTrait, ProgressServiceTrait};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::goals::GoalRepositoryTrait;

/// Records progress against goals and announces completion transitions.
pub struct ProgressService {
    repository: Arc<dyn ProgressRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl ProgressService {
    pub fn new(
        repository: Arc<dyn ProgressRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            goal_repository,
            event_sink,
        }
    }
}

#[async_trait::async_trait]
impl ProgressServiceTrait for ProgressService {
    async fn record_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        submission: ProgressSubmission,
    ) -> Result<ProgressOutcome> {
        let new_update = submission.into_new_update(goal_id, user_id)?;
        debug!(
            "Recording progress {} on goal {} for user {}",
            new_update.amount.value(),
            goal_id,
            user_id
        );

        let now = Utc::now().naive_utc();
        let outcome = self.repository.append_update(new_update, now).await?;

        // The write has committed; the event only describes it.
        if let Some(transition) = outcome.transition {
            info!(
                "Goal {} transitioned ({:?}) at value {}",
                outcome.goal.id, transition, outcome.goal.current_value
            );
            self.event_sink
                .emit(DomainEvent::from_transition(&outcome.goal, transition));
        }
        Ok(outcome)
    }

    fn list_updates(&self, user_id: &str, goal_id: &str) -> Result<Vec<GoalUpdate>> {
        let goal = self.goal_repository.get_goal(user_id, goal_id)?;
        self.repository.list_updates(&goal.id)
    }
}
