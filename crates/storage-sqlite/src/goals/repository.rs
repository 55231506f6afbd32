use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use goalgang_core::errors::{Error, Result};
use goalgang_core::goals::{
    Goal, GoalEdit, GoalEditOutcome, GoalFilter, GoalRepositoryTrait, GoalStatusFilter,
};

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::goals;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

/// Loads a goal owned by `user_id`. A goal owned by someone else is
/// reported as missing.
pub(crate) fn load_owned_goal(
    conn: &mut SqliteConnection,
    user_id: &str,
    goal_id: &str,
) -> Result<Goal> {
    goals::table
        .filter(goals::id.eq(goal_id))
        .filter(goals::user_id.eq(user_id))
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::NotFound("Goal".to_string()))
        .and_then(Goal::try_from)
}

/// Overwrites the stored row with `goal`.
pub(crate) fn store_goal(conn: &mut SqliteConnection, goal: Goal) -> Result<()> {
    let goal_db = GoalDB::from(goal);
    diesel::update(goals::table.find(goal_db.id.clone()))
        .set(&goal_db)
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(())
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    async fn insert_goal(&self, goal: Goal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let goal_db = GoalDB::from(goal);
                let result_db = diesel::insert_into(goals::table)
                    .values(&goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Goal::try_from(result_db)
            })
            .await
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        load_owned_goal(&mut conn, user_id, goal_id)
    }

    fn list_goals(&self, user_id: &str, filter: &GoalFilter) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = goals::table
            .filter(goals::user_id.eq(user_id))
            .select(GoalDB::as_select())
            .into_boxed();
        if let Some(group_id) = &filter.group_id {
            query = query.filter(goals::group_id.eq(group_id.clone()));
        }
        match filter.status {
            Some(GoalStatusFilter::Active) => query = query.filter(goals::is_completed.eq(false)),
            Some(GoalStatusFilter::Completed) => {
                query = query.filter(goals::is_completed.eq(true))
            }
            None => {}
        }

        query
            .order((goals::created_at.desc(), goals::id.desc()))
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Goal::try_from)
            .collect()
    }

    async fn edit_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        edit: GoalEdit,
        now: NaiveDateTime,
    ) -> Result<GoalEditOutcome> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<GoalEditOutcome> {
                let goal = load_owned_goal(conn, &user_id, &goal_id)?;
                let outcome = edit.apply_to(&goal, now)?;
                store_goal(conn, outcome.goal.clone())?;
                Ok(outcome)
            })
            .await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // goal_updates rows go with it (ON DELETE CASCADE).
                Ok(diesel::delete(
                    goals::table
                        .filter(goals::id.eq(goal_id))
                        .filter(goals::user_id.eq(user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
