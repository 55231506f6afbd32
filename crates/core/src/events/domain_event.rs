//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::goals::Goal;
use crate::progress::GoalTransition;

/// Domain events emitted by core services after a successful commit.
///
/// Runtime adapters translate them into notifications. An event is only
/// built from an evaluator transition, so each one corresponds to exactly
/// one status change of one goal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A goal reached its target for the first time.
    GoalCompleted {
        user_id: String,
        goal_id: String,
        goal_title: String,
        /// The completing update also went strictly past the target.
        was_surpassed: bool,
    },

    /// A goal that was already completed went strictly past its target.
    GoalSurpassed {
        user_id: String,
        goal_id: String,
        goal_title: String,
    },
}

impl DomainEvent {
    /// Builds the event for `transition` as observed on `goal`.
    pub fn from_transition(goal: &Goal, transition: GoalTransition) -> Self {
        match transition {
            GoalTransition::Completed { surpassed } => Self::GoalCompleted {
                user_id: goal.user_id.clone(),
                goal_id: goal.id.clone(),
                goal_title: goal.title.clone(),
                was_surpassed: surpassed,
            },
            GoalTransition::Surpassed => Self::GoalSurpassed {
                user_id: goal.user_id.clone(),
                goal_id: goal.id.clone(),
                goal_title: goal.title.clone(),
            },
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            Self::GoalCompleted { user_id, .. } | Self::GoalSurpassed { user_id, .. } => user_id,
        }
    }

    pub fn goal_id(&self) -> &str {
        match self {
            Self::GoalCompleted { goal_id, .. } | Self::GoalSurpassed { goal_id, .. } => goal_id,
        }
    }
}
