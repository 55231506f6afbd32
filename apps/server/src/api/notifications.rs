use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Extension, Json, Router,
};

use crate::{
    auth::AuthUser,
    error::ApiResult,
    main_lib::AppState,
    models::{
        NotificationListQuery, NotificationResponse, UnreadCountResponse, UpdatedCountResponse,
    },
};

#[utoipa::path(
    get,
    path = "/api/notifications",
    params(NotificationListQuery),
    responses((status = 200, body = [NotificationResponse]), (status = 401))
)]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<NotificationListQuery>,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let notifications = state
        .notification_service
        .list_notifications(&user.id, query.unread_only)?;
    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    responses((status = 200, body = UnreadCountResponse), (status = 401))
)]
pub async fn unread_count(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<UnreadCountResponse>> {
    let count = state.notification_service.unread_count(&user.id)?;
    Ok(Json(UnreadCountResponse { count }))
}

#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    responses((status = 200, body = UpdatedCountResponse), (status = 401))
)]
pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<UpdatedCountResponse>> {
    let updated = state.notification_service.mark_all_read(&user.id).await?;
    Ok(Json(UpdatedCountResponse { updated }))
}

#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    responses((status = 200, body = NotificationResponse), (status = 401), (status = 404))
)]
pub async fn mark_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<NotificationResponse>> {
    let notification = state.notification_service.mark_read(&user.id, &id).await?;
    Ok(Json(notification.into()))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    responses((status = 204), (status = 401), (status = 404))
)]
pub async fn delete_notification(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<StatusCode> {
    state
        .notification_service
        .delete_notification(&user.id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/read-all", put(mark_all_read))
        .route("/notifications/{id}/read", put(mark_read))
        .route("/notifications/{id}", delete(delete_notification))
}
