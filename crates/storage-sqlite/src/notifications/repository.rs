use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use goalgang_core::errors::{Error, Result};
use goalgang_core::notifications::{Notification, NotificationRepositoryTrait};

use super::model::NotificationDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::notifications;

pub struct NotificationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl NotificationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        NotificationRepository { pool, writer }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    async fn insert_notification(&self, notification: Notification) -> Result<Notification> {
        let notification_db = NotificationDB::try_from(notification)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Notification> {
                let result_db = diesel::insert_into(notifications::table)
                    .values(&notification_db)
                    .returning(NotificationDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Notification::try_from(result_db)
            })
            .await
    }

    fn list_notifications(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .select(NotificationDB::as_select())
            .into_boxed();
        if unread_only {
            query = query.filter(notifications::is_read.eq(false));
        }
        query
            .order((notifications::created_at.desc(), notifications::id.desc()))
            .load::<NotificationDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Notification::try_from)
            .collect()
    }

    fn count_unread(&self, user_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(notifications::table
            .filter(notifications::user_id.eq(user_id))
            .filter(notifications::is_read.eq(false))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }

    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Notification> {
        let user_id = user_id.to_string();
        let notification_id = notification_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Notification> {
                diesel::update(
                    notifications::table
                        .filter(notifications::id.eq(&notification_id))
                        .filter(notifications::user_id.eq(&user_id)),
                )
                .set(notifications::is_read.eq(true))
                .returning(NotificationDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .ok_or_else(|| Error::NotFound("Notification".to_string()))
                .and_then(Notification::try_from)
            })
            .await
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    notifications::table
                        .filter(notifications::user_id.eq(&user_id))
                        .filter(notifications::is_read.eq(false)),
                )
                .set(notifications::is_read.eq(true))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn delete_notification(&self, user_id: &str, notification_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let notification_id = notification_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    notifications::table
                        .filter(notifications::id.eq(&notification_id))
                        .filter(notifications::user_id.eq(&user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
