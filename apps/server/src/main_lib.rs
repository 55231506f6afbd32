use std::sync::Arc;

use goalgang_core::{
    goals::{GoalService, GoalServiceTrait},
    notifications::{NotificationService, NotificationServiceTrait},
    progress::{ProgressService, ProgressServiceTrait},
    users::{UserService, UserServiceTrait},
};
use goalgang_storage_sqlite::{
    db, goals::GoalRepository, notifications::NotificationRepository,
    progress::ProgressRepository, users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::AuthManager, config::Config, domain_events::NotificationEventSink,
    push::LoggingPushDelivery,
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub progress_service: Arc<dyn ProgressServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
    pub auth: Arc<AuthManager>,
}

/// Installs the global subscriber. `GG_LOG_FORMAT=json` switches to JSON
/// lines; the filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("GG_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let progress_repository = Arc::new(ProgressRepository::new(pool.clone(), writer.clone()));
    let notification_repository =
        Arc::new(NotificationRepository::new(pool.clone(), writer.clone()));

    let event_sink = Arc::new(NotificationEventSink::new());

    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(user_repository));
    let goal_service: Arc<dyn GoalServiceTrait> = Arc::new(GoalService::new(
        goal_repository.clone(),
        progress_repository.clone(),
        event_sink.clone(),
    ));
    let progress_service: Arc<dyn ProgressServiceTrait> = Arc::new(ProgressService::new(
        progress_repository,
        goal_repository,
        event_sink.clone(),
    ));
    let notification_service: Arc<dyn NotificationServiceTrait> = Arc::new(
        NotificationService::new(notification_repository, Arc::new(LoggingPushDelivery)),
    );

    event_sink.start_worker(notification_service.clone());

    Ok(Arc::new(AppState {
        user_service,
        goal_service,
        progress_service,
        notification_service,
        auth: Arc::new(AuthManager::new(&config.jwt_secret, config.token_ttl)),
    }))
}
