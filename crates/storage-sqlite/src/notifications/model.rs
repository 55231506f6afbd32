//! Database models for notifications.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use goalgang_core::errors::{Error, Result};
use goalgang_core::notifications::{Notification, NotificationType};

use crate::errors::StorageError;

/// Database model for notifications. `data` holds a JSON document.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationDB {
    pub id: String,
    pub user_id: String,
    pub notification_type: String,
    pub title: String,
    pub body: String,
    pub data: Option<String>,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

impl TryFrom<NotificationDB> for Notification {
    type Error = Error;

    fn try_from(db: NotificationDB) -> Result<Self> {
        let data = db
            .data
            .as_deref()
            .map(serde_json::from_str::<serde_json::Value>)
            .transpose()
            .map_err(StorageError::from)?;
        Ok(Self {
            notification_type: db.notification_type.parse::<NotificationType>()?,
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            body: db.body,
            data,
            is_read: db.is_read,
            created_at: db.created_at,
        })
    }
}

impl TryFrom<Notification> for NotificationDB {
    type Error = Error;

    fn try_from(domain: Notification) -> Result<Self> {
        let data = domain
            .data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(StorageError::from)?;
        Ok(Self {
            id: domain.id,
            user_id: domain.user_id,
            notification_type: domain.notification_type.as_str().to_string(),
            title: domain.title,
            body: domain.body,
            data,
            is_read: domain.is_read,
            created_at: domain.created_at,
        })
    }
}
