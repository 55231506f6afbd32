use chrono::Utc;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use super::users_model::{normalize_email, NewUser, User, UserCredentials};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let email = normalize_email(&new_user.email);
        if self.repository.find_credentials(&email)?.is_some() {
            return Err(Error::ConstraintViolation(format!(
                "An account already exists for {}",
                email
            )));
        }

        let now = Utc::now().naive_utc();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            display_name: new_user.display_name.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        let user = self
            .repository
            .insert_user(user, new_user.password_hash)
            .await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_user(user_id)
    }

    fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>> {
        self.repository.find_credentials(&normalize_email(email))
    }
}
