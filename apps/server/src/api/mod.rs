use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{auth, config::Config, main_lib::AppState, models};

pub mod goals;
pub mod health;
pub mod notifications;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        auth::register,
        auth::login,
        auth::me,
        goals::list_goals,
        goals::create_goal,
        goals::goal_summary,
        goals::get_goal,
        goals::update_goal,
        goals::delete_goal,
        goals::list_updates,
        goals::record_progress,
        notifications::list_notifications,
        notifications::unread_count,
        notifications::mark_all_read,
        notifications::mark_read,
        notifications::delete_notification,
    ),
    components(schemas(
        models::UserResponse,
        models::RegisterRequest,
        models::LoginRequest,
        models::AuthResponse,
        models::GoalResponse,
        models::GoalUpdateResponse,
        models::NewGoalRequest,
        models::GoalEditRequest,
        models::GoalSummaryResponse,
        models::ProgressRequest,
        models::ProgressResponse,
        models::NotificationResponse,
        models::UnreadCountResponse,
        models::UpdatedCountResponse,
    ))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .merge(goals::router())
        .merge(notifications::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let api = Router::new()
        .merge(health::router())
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .merge(protected);

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
