//! In-memory repositories shared by the service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::goals::{Goal, GoalEdit, GoalEditOutcome, GoalFilter, GoalRepositoryTrait};
use crate::progress::{GoalUpdate, NewGoalUpdate, ProgressOutcome, ProgressRepositoryTrait};

/// Goals and their ledger behind one lock, so an append reads and writes
/// the goal atomically like the SQLite writer does.
#[derive(Default)]
pub struct MockGoalStore {
    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    goals: Vec<Goal>,
    updates: Vec<GoalUpdate>,
}

impl MockGoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_count(&self, goal_id: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.updates.iter().filter(|u| u.goal_id == goal_id).count()
    }
}

fn not_found() -> Error {
    Error::NotFound("Goal".to_string())
}

#[async_trait]
impl GoalRepositoryTrait for MockGoalStore {
    async fn insert_goal(&self, goal: Goal) -> Result<Goal> {
        self.state.lock().unwrap().goals.push(goal.clone());
        Ok(goal)
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let state = self.state.lock().unwrap();
        state
            .goals
            .iter()
            .find(|g| g.id == goal_id && g.user_id == user_id)
            .cloned()
            .ok_or_else(not_found)
    }

    fn list_goals(&self, user_id: &str, filter: &GoalFilter) -> Result<Vec<Goal>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .goals
            .iter()
            .rev()
            .filter(|g| g.user_id == user_id && filter.matches(g))
            .cloned()
            .collect())
    }

    async fn edit_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        edit: GoalEdit,
        now: NaiveDateTime,
    ) -> Result<GoalEditOutcome> {
        let mut state = self.state.lock().unwrap();
        let goal = state
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id && g.user_id == user_id)
            .ok_or_else(not_found)?;
        let outcome = edit.apply_to(goal, now)?;
        *goal = outcome.goal.clone();
        Ok(outcome)
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.goals.len();
        state
            .goals
            .retain(|g| !(g.id == goal_id && g.user_id == user_id));
        let deleted = before - state.goals.len();
        if deleted > 0 {
            state.updates.retain(|u| u.goal_id != goal_id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl ProgressRepositoryTrait for MockGoalStore {
    async fn append_update(
        &self,
        new_update: NewGoalUpdate,
        now: NaiveDateTime,
    ) -> Result<ProgressOutcome> {
        let mut state = self.state.lock().unwrap();
        let goal = state
            .goals
            .iter_mut()
            .find(|g| g.id == new_update.goal_id && g.user_id == new_update.user_id)
            .ok_or_else(not_found)?;
        let outcome = new_update.apply_to(goal, Uuid::new_v4().to_string(), now)?;
        *goal = outcome.goal.clone();
        state.updates.push(outcome.update.clone());
        Ok(outcome)
    }

    fn list_updates(&self, goal_id: &str) -> Result<Vec<GoalUpdate>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .updates
            .iter()
            .rev()
            .filter(|u| u.goal_id == goal_id)
            .cloned()
            .collect())
    }
}
