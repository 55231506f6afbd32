use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use goalgang_core::errors::Result;
use goalgang_core::progress::{
    GoalUpdate, NewGoalUpdate, ProgressOutcome, ProgressRepositoryTrait,
};

use super::model::GoalUpdateDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::goals::repository::{load_owned_goal, store_goal};
use crate::schema::goal_updates;

pub struct ProgressRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProgressRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProgressRepository { pool, writer }
    }
}

#[async_trait]
impl ProgressRepositoryTrait for ProgressRepository {
    async fn append_update(
        &self,
        new_update: NewGoalUpdate,
        now: NaiveDateTime,
    ) -> Result<ProgressOutcome> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ProgressOutcome> {
                // Read, append and write back inside the writer's transaction.
                let goal = load_owned_goal(conn, &new_update.user_id, &new_update.goal_id)?;
                let outcome = new_update.apply_to(&goal, Uuid::new_v4().to_string(), now)?;

                diesel::insert_into(goal_updates::table)
                    .values(GoalUpdateDB::from(outcome.update.clone()))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                store_goal(conn, outcome.goal.clone())?;

                debug!(
                    "Appended {} to goal {}, now {}",
                    outcome.update.amount, outcome.goal.id, outcome.goal.current_value
                );
                Ok(outcome)
            })
            .await
    }

    fn list_updates(&self, goal_id: &str) -> Result<Vec<GoalUpdate>> {
        let mut conn = get_connection(&self.pool)?;
        goal_updates::table
            .filter(goal_updates::goal_id.eq(goal_id))
            .order((goal_updates::created_at.desc(), goal_updates::id.desc()))
            .select(GoalUpdateDB::as_select())
            .load::<GoalUpdateDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(GoalUpdate::try_from)
            .collect()
    }
}
