use async_trait::async_trait;

use super::users_model::{NewUser, User, UserCredentials};
use crate::errors::Result;

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Inserts a user. A taken email surfaces as a unique-constraint error.
    async fn insert_user(&self, user: User, password_hash: String) -> Result<User>;

    fn get_user(&self, user_id: &str) -> Result<User>;

    /// Looks a user up by normalized email.
    fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>>;
}

#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;

    fn get_user(&self, user_id: &str) -> Result<User>;

    fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>>;
}
