//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use goalgang_core::users::{User, UserCredentials};

/// Database model for users, including the password hash.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl UserDB {
    pub fn from_domain(user: User, password_hash: String) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            password_hash,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            email: db.email,
            display_name: db.display_name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<UserDB> for UserCredentials {
    fn from(db: UserDB) -> Self {
        let password_hash = db.password_hash.clone();
        Self {
            user: User::from(db),
            password_hash,
        }
    }
}
