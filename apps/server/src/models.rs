use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use goalgang_core::goals as core_goals;
use goalgang_core::notifications as core_notifications;
use goalgang_core::progress as core_progress;
use goalgang_core::users as core_users;

use crate::error::ApiError;

// ---------------------------------------------------------------------------
// Users and auth
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub created_at: NaiveDateTime,
}

impl From<core_users::User> for UserResponse {
    fn from(u: core_users::User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            display_name: u.display_name,
            created_at: u.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    pub id: String,
    pub user_id: String,
    pub group_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub target_value: Decimal,
    #[schema(value_type = f64)]
    pub current_value: Decimal,
    pub unit: String,
    pub category: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_completed: bool,
    pub is_surpassed: bool,
    pub completed_at: Option<NaiveDateTime>,
    pub progress_percent: u32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Present on single-goal reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updates: Option<Vec<GoalUpdateResponse>>,
}

impl From<core_goals::Goal> for GoalResponse {
    fn from(g: core_goals::Goal) -> Self {
        let progress_percent = g.progress_percent();
        Self {
            id: g.id,
            user_id: g.user_id,
            group_id: g.group_id,
            title: g.title,
            description: g.description,
            target_value: g.target_value,
            current_value: g.current_value,
            unit: g.unit,
            category: g.category,
            start_date: g.start_date,
            end_date: g.end_date,
            is_completed: g.status.is_completed(),
            is_surpassed: g.status.is_surpassed(),
            completed_at: g.status.completed_at(),
            progress_percent,
            created_at: g.created_at,
            updated_at: g.updated_at,
            updates: None,
        }
    }
}

impl From<core_goals::GoalWithUpdates> for GoalResponse {
    fn from(detail: core_goals::GoalWithUpdates) -> Self {
        let mut goal = GoalResponse::from(detail.goal);
        goal.updates = Some(detail.updates.into_iter().map(Into::into).collect());
        goal
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdateResponse {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub note: Option<String>,
    pub proof_url: Option<String>,
    pub proof_type: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<core_progress::GoalUpdate> for GoalUpdateResponse {
    fn from(u: core_progress::GoalUpdate) -> Self {
        let (proof_url, proof_type) = match u.proof {
            Some(proof) => (Some(proof.url), Some(proof.proof_type.as_str().to_string())),
            None => (None, None),
        };
        Self {
            id: u.id,
            goal_id: u.goal_id,
            user_id: u.user_id,
            amount: u.amount,
            note: u.note,
            proof_url,
            proof_type,
            created_at: u.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewGoalRequest {
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub target_value: Decimal,
    pub unit: String,
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: NaiveDate,
    pub group_id: Option<String>,
}

impl From<NewGoalRequest> for core_goals::NewGoal {
    fn from(r: NewGoalRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            target_value: r.target_value,
            unit: r.unit,
            category: r.category,
            start_date: r.start_date,
            end_date: r.end_date,
            group_id: r.group_id,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalEditRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub target_value: Option<Decimal>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub end_date: Option<NaiveDate>,
}

impl From<GoalEditRequest> for core_goals::GoalEdit {
    fn from(r: GoalEditRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            target_value: r.target_value,
            unit: r.unit,
            category: r.category,
            end_date: r.end_date,
        }
    }
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GoalListQuery {
    pub group_id: Option<String>,
    /// `active` or `completed`.
    pub status: Option<String>,
}

impl TryFrom<GoalListQuery> for core_goals::GoalFilter {
    type Error = ApiError;

    fn try_from(q: GoalListQuery) -> Result<Self, Self::Error> {
        let status = match q.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some("active") => Some(core_goals::GoalStatusFilter::Active),
            Some("completed") => Some(core_goals::GoalStatusFilter::Completed),
            Some(other) => {
                return Err(ApiError::BadRequest(format!(
                    "Unknown status filter '{}', expected 'active' or 'completed'",
                    other
                )))
            }
        };
        Ok(Self {
            group_id: q.group_id.filter(|g| !g.trim().is_empty()),
            status,
        })
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummaryResponse {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub surpassed: usize,
    pub completion_rate: u32,
}

impl From<core_goals::GoalSummary> for GoalSummaryResponse {
    fn from(s: core_goals::GoalSummary) -> Self {
        Self {
            total: s.total,
            in_progress: s.in_progress,
            completed: s.completed,
            surpassed: s.surpassed,
            completion_rate: s.completion_rate,
        }
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[derive(Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub note: Option<String>,
    pub proof_url: Option<String>,
    /// `image` or `document`.
    pub proof_type: Option<String>,
}

impl TryFrom<ProgressRequest> for core_progress::ProgressSubmission {
    type Error = ApiError;

    fn try_from(r: ProgressRequest) -> Result<Self, Self::Error> {
        let proof_type = r
            .proof_type
            .as_deref()
            .map(str::parse::<core_progress::ProofType>)
            .transpose()?;
        Ok(Self {
            amount: r.amount,
            note: r.note,
            proof_url: r.proof_url,
            proof_type,
        })
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ProgressResponse {
    pub update: GoalUpdateResponse,
    pub goal: GoalResponse,
}

impl From<core_progress::ProgressOutcome> for ProgressResponse {
    fn from(outcome: core_progress::ProgressOutcome) -> Self {
        Self {
            update: outcome.update.into(),
            goal: outcome.goal.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub body: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

impl From<core_notifications::Notification> for NotificationResponse {
    fn from(n: core_notifications::Notification) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            notification_type: n.notification_type.as_str().to_string(),
            title: n.title,
            body: n.body,
            data: n.data,
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct UpdatedCountResponse {
    pub updated: usize,
}
