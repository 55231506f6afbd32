//! Goals domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::progress::{
    evaluate_status, progress_percent, GoalTransition, GoalUpdate, StatusEvaluation,
};

/// Completion state of a goal.
///
/// Replaces the `is_completed` / `is_surpassed` / `completed_at` triple so a
/// surpassed-but-not-completed goal cannot be represented. The timestamp is
/// the moment the goal first reached its target and is carried unchanged
/// from `Completed` into `Surpassed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    InProgress,
    #[serde(rename_all = "camelCase")]
    Completed { completed_at: NaiveDateTime },
    #[serde(rename_all = "camelCase")]
    Surpassed { completed_at: NaiveDateTime },
}

impl GoalStatus {
    pub fn is_completed(&self) -> bool {
        !matches!(self, GoalStatus::InProgress)
    }

    pub fn is_surpassed(&self) -> bool {
        matches!(self, GoalStatus::Surpassed { .. })
    }

    pub fn completed_at(&self) -> Option<NaiveDateTime> {
        match self {
            GoalStatus::InProgress => None,
            GoalStatus::Completed { completed_at } | GoalStatus::Surpassed { completed_at } => {
                Some(*completed_at)
            }
        }
    }

    /// Rebuilds the status from its flattened storage form.
    ///
    /// Rejects flag combinations that have no `GoalStatus` equivalent.
    pub fn from_flags(
        is_completed: bool,
        is_surpassed: bool,
        completed_at: Option<NaiveDateTime>,
    ) -> Result<Self> {
        match (is_completed, is_surpassed, completed_at) {
            (false, false, None) => Ok(GoalStatus::InProgress),
            (true, false, Some(completed_at)) => Ok(GoalStatus::Completed { completed_at }),
            (true, true, Some(completed_at)) => Ok(GoalStatus::Surpassed { completed_at }),
            (completed, surpassed, at) => Err(Error::Unexpected(format!(
                "Inconsistent goal status flags: is_completed={}, is_surpassed={}, completed_at={:?}",
                completed, surpassed, at
            ))),
        }
    }
}

/// Domain model representing a goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub group_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub target_value: Decimal,
    pub current_value: Decimal,
    pub unit: String,
    pub category: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: GoalStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    /// Rounded percentage of the target reached so far, for display.
    pub fn progress_percent(&self) -> u32 {
        progress_percent(self.current_value, self.target_value)
    }
}

/// A goal together with its ledger, newest entry first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalWithUpdates {
    #[serde(flatten)]
    pub goal: Goal,
    pub updates: Vec<GoalUpdate>,
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    pub target_value: Decimal,
    pub unit: String,
    pub category: Option<String>,
    /// Defaults to the creation day when absent.
    pub start_date: Option<NaiveDate>,
    pub end_date: NaiveDate,
    pub group_id: Option<String>,
}

impl NewGoal {
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        validate_title(&self.title)?;
        validate_target(self.target_value)?;
        validate_unit(&self.unit)?;
        let start_date = self.start_date.unwrap_or(today);
        validate_dates(start_date, self.end_date)
    }

    /// Builds the stored goal: no progress yet, in progress.
    pub fn into_goal(self, id: String, user_id: &str, now: NaiveDateTime) -> Goal {
        Goal {
            id,
            user_id: user_id.to_string(),
            group_id: self.group_id.as_deref().and_then(non_blank),
            title: self.title.trim().to_string(),
            description: self.description.as_deref().and_then(non_blank),
            target_value: self.target_value,
            current_value: Decimal::ZERO,
            unit: self.unit.trim().to_string(),
            category: self.category.as_deref().and_then(non_blank),
            start_date: self.start_date.unwrap_or_else(|| now.date()),
            end_date: self.end_date,
            status: GoalStatus::InProgress,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial edit of a goal's descriptive fields and target.
///
/// Progress is never edited directly; it only moves through the ledger.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_value: Option<Decimal>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub end_date: Option<NaiveDate>,
}

impl GoalEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.target_value.is_none()
            && self.unit.is_none()
            && self.category.is_none()
            && self.end_date.is_none()
    }

    /// Applies the edit to a copy of `goal`, validates the result and
    /// re-evaluates the status against the (possibly new) target.
    pub fn apply_to(&self, goal: &Goal, now: NaiveDateTime) -> Result<GoalEditOutcome> {
        let mut edited = goal.clone();
        if let Some(title) = &self.title {
            validate_title(title)?;
            edited.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            edited.description = non_blank(description);
        }
        if let Some(target_value) = self.target_value {
            validate_target(target_value)?;
            edited.target_value = target_value;
        }
        if let Some(unit) = &self.unit {
            validate_unit(unit)?;
            edited.unit = unit.trim().to_string();
        }
        if let Some(category) = &self.category {
            edited.category = non_blank(category);
        }
        if let Some(end_date) = self.end_date {
            validate_dates(edited.start_date, end_date)?;
            edited.end_date = end_date;
        }

        let StatusEvaluation { status, transition } =
            evaluate_status(edited.status, edited.current_value, edited.target_value, now);
        edited.status = status;
        edited.updated_at = now;
        Ok(GoalEditOutcome {
            goal: edited,
            transition,
        })
    }
}

/// Result of a committed goal edit.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalEditOutcome {
    pub goal: Goal,
    /// Set when a lowered target completed or surpassed the goal.
    pub transition: Option<GoalTransition>,
}

/// Status filter accepted when listing goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatusFilter {
    Active,
    Completed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalFilter {
    pub group_id: Option<String>,
    pub status: Option<GoalStatusFilter>,
}

impl GoalFilter {
    pub fn matches(&self, goal: &Goal) -> bool {
        if let Some(group_id) = &self.group_id {
            if goal.group_id.as_deref() != Some(group_id.as_str()) {
                return false;
            }
        }
        match self.status {
            Some(GoalStatusFilter::Active) => !goal.status.is_completed(),
            Some(GoalStatusFilter::Completed) => goal.status.is_completed(),
            None => true,
        }
    }
}

/// Simple per-user aggregation over goal statuses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub surpassed: usize,
    /// Completed goals (surpassed included) over all goals, 0..=100.
    pub completion_rate: u32,
}

impl GoalSummary {
    pub fn from_goals(goals: &[Goal]) -> Self {
        let mut summary = GoalSummary {
            total: goals.len(),
            ..Default::default()
        };
        for goal in goals {
            match goal.status {
                GoalStatus::InProgress => summary.in_progress += 1,
                GoalStatus::Completed { .. } => summary.completed += 1,
                GoalStatus::Surpassed { .. } => summary.surpassed += 1,
            }
        }
        if summary.total > 0 {
            let done = (summary.completed + summary.surpassed) as f64;
            summary.completion_rate = (done / summary.total as f64 * 100.0).round() as u32;
        }
        summary
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "title".to_string(),
        )));
    }
    Ok(())
}

fn validate_target(target_value: Decimal) -> Result<()> {
    if target_value <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidAmount(format!(
            "target value must be greater than zero, got {}",
            target_value
        ))));
    }
    Ok(())
}

fn validate_unit(unit: &str) -> Result<()> {
    if unit.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "unit".to_string(),
        )));
    }
    Ok(())
}

fn validate_dates(start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
    if end_date < start_date {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "end date {} is before start date {}",
            end_date, start_date
        ))));
    }
    Ok(())
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
