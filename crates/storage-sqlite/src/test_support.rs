//! Temporary databases for repository tests.

use std::sync::Arc;

use chrono::Utc;
use goalgang_core::users::{User, UserRepositoryTrait};
use tempfile::TempDir;

use crate::db::{create_pool, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::users::UserRepository;

/// Keep the returned `TempDir` alive for the duration of the test.
pub fn create_test_db() -> (Arc<DbPool>, WriteHandle, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_path_str = db_path.to_string_lossy().to_string();

    let pool = create_pool(&db_path_str).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());
    (pool, writer, temp_dir)
}

/// Inserts a user so foreign keys on goals and notifications hold.
pub async fn create_test_user(pool: &Arc<DbPool>, writer: &WriteHandle, user_id: &str) -> User {
    let now = Utc::now().naive_utc();
    let repo = UserRepository::new(Arc::clone(pool), writer.clone());
    repo.insert_user(
        User {
            id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
            display_name: user_id.to_string(),
            created_at: now,
            updated_at: now,
        },
        "$argon2id$test".to_string(),
    )
    .await
    .expect("Failed to create test user")
}
