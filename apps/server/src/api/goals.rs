use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use goalgang_core::goals::GoalFilter;
use goalgang_core::progress::ProgressSubmission;

use crate::{
    auth::AuthUser,
    error::{ApiJson, ApiResult},
    main_lib::AppState,
    models::{
        GoalEditRequest, GoalListQuery, GoalResponse, GoalSummaryResponse, GoalUpdateResponse,
        NewGoalRequest, ProgressRequest, ProgressResponse,
    },
};

#[utoipa::path(
    get,
    path = "/api/goals",
    params(GoalListQuery),
    responses((status = 200, body = [GoalResponse]), (status = 401))
)]
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<GoalListQuery>,
) -> ApiResult<Json<Vec<GoalResponse>>> {
    let filter = GoalFilter::try_from(query)?;
    let goals = state.goal_service.list_goals(&user.id, &filter)?;
    Ok(Json(goals.into_iter().map(GoalResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/goals",
    request_body = NewGoalRequest,
    responses((status = 201, body = GoalResponse), (status = 400), (status = 401))
)]
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<NewGoalRequest>,
) -> ApiResult<(StatusCode, Json<GoalResponse>)> {
    let goal = state
        .goal_service
        .create_goal(&user.id, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(goal.into())))
}

#[utoipa::path(
    get,
    path = "/api/goals/summary",
    responses((status = 200, body = GoalSummaryResponse), (status = 401))
)]
pub async fn goal_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<GoalSummaryResponse>> {
    let summary = state.goal_service.get_summary(&user.id)?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    get,
    path = "/api/goals/{id}",
    responses((status = 200, body = GoalResponse), (status = 401), (status = 404))
)]
pub async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<GoalResponse>> {
    let detail = state.goal_service.get_goal(&user.id, &id)?;
    Ok(Json(detail.into()))
}

#[utoipa::path(
    put,
    path = "/api/goals/{id}",
    request_body = GoalEditRequest,
    responses((status = 200, body = GoalResponse), (status = 400), (status = 401), (status = 404))
)]
pub async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<GoalEditRequest>,
) -> ApiResult<Json<GoalResponse>> {
    let goal = state
        .goal_service
        .update_goal(&user.id, &id, payload.into())
        .await?;
    Ok(Json(goal.into()))
}

#[utoipa::path(
    delete,
    path = "/api/goals/{id}",
    responses((status = 204), (status = 401), (status = 404))
)]
pub async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/goals/{id}/updates",
    responses((status = 200, body = [GoalUpdateResponse]), (status = 401), (status = 404))
)]
pub async fn list_updates(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<GoalUpdateResponse>>> {
    let updates = state.progress_service.list_updates(&user.id, &id)?;
    Ok(Json(updates.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/goals/{id}/updates",
    request_body = ProgressRequest,
    responses(
        (status = 201, body = ProgressResponse),
        (status = 400, description = "Amount is not positive or proof is incomplete"),
        (status = 401),
        (status = 404, description = "Goal missing or owned by someone else")
    )
)]
pub async fn record_progress(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<ProgressRequest>,
) -> ApiResult<(StatusCode, Json<ProgressResponse>)> {
    let submission = ProgressSubmission::try_from(payload)?;
    let outcome = state
        .progress_service
        .record_progress(&user.id, &id, submission)
        .await?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/summary", get(goal_summary))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/updates", get(list_updates).post(record_progress))
}
