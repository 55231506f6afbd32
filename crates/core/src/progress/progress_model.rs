//! Progress ledger domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::progress_evaluator::{apply_progress, GoalTransition, ProgressEvaluation};
use crate::errors::{Error, Result, ValidationError};
use crate::goals::Goal;

/// A strictly positive progress amount.
///
/// The only way to build one is [`ProgressAmount::new`], so every ledger
/// entry carries an amount that has already passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProgressAmount(Decimal);

impl ProgressAmount {
    pub fn new(amount: Decimal) -> Result<Self> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidAmount(format!(
                "amount must be greater than zero, got {}",
                amount
            ))));
        }
        Ok(Self(amount))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for ProgressAmount {
    type Error = Error;

    fn try_from(amount: Decimal) -> Result<Self> {
        Self::new(amount)
    }
}

/// Kind of proof attached to a progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofType {
    Image,
    Document,
}

impl ProofType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofType::Image => "image",
            ProofType::Document => "document",
        }
    }
}

impl fmt::Display for ProofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProofType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "image" => Ok(ProofType::Image),
            "document" => Ok(ProofType::Document),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown proof type '{}'",
                other
            )))),
        }
    }
}

/// Reference to an uploaded proof file. URL and type always travel together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofAttachment {
    pub url: String,
    pub proof_type: ProofType,
}

impl ProofAttachment {
    /// Pairs the optional wire fields, rejecting a URL without a type or
    /// a type without a URL.
    pub fn from_parts(url: Option<String>, proof_type: Option<ProofType>) -> Result<Option<Self>> {
        let url = url.map(|u| u.trim().to_string());
        match (url, proof_type) {
            (None, None) => Ok(None),
            (Some(url), _) if url.is_empty() => Err(Error::Validation(
                ValidationError::InvalidInput("proofUrl cannot be blank".to_string()),
            )),
            (Some(url), Some(proof_type)) => Ok(Some(ProofAttachment { url, proof_type })),
            (Some(_), None) => Err(Error::Validation(ValidationError::MissingField(
                "proofType".to_string(),
            ))),
            (None, Some(_)) => Err(Error::Validation(ValidationError::MissingField(
                "proofUrl".to_string(),
            ))),
        }
    }
}

/// A single, immutable ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub note: Option<String>,
    pub proof: Option<ProofAttachment>,
    pub created_at: NaiveDateTime,
}

/// Validated input for appending a ledger entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoalUpdate {
    pub goal_id: String,
    pub user_id: String,
    pub amount: ProgressAmount,
    pub note: Option<String>,
    pub proof: Option<ProofAttachment>,
}

impl NewGoalUpdate {
    /// Appends this entry to `goal`: builds the ledger record and the goal
    /// state that results from it. Callers persist both in one transaction,
    /// and write nothing when this fails.
    pub fn apply_to(
        self,
        goal: &Goal,
        update_id: String,
        now: NaiveDateTime,
    ) -> Result<ProgressOutcome> {
        let ProgressEvaluation {
            current_value,
            status,
            transition,
        } = apply_progress(goal, self.amount, now)?;

        let mut goal = goal.clone();
        goal.current_value = current_value;
        goal.status = status;
        goal.updated_at = now;

        Ok(ProgressOutcome {
            update: GoalUpdate {
                id: update_id,
                goal_id: self.goal_id,
                user_id: self.user_id,
                amount: self.amount.value(),
                note: self.note,
                proof: self.proof,
                created_at: now,
            },
            goal,
            transition,
        })
    }
}

/// Raw progress submission as received from a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSubmission {
    pub amount: Decimal,
    pub note: Option<String>,
    pub proof_url: Option<String>,
    pub proof_type: Option<ProofType>,
}

impl ProgressSubmission {
    /// Validates the submission. Nothing is written when this fails.
    pub fn into_new_update(self, goal_id: &str, user_id: &str) -> Result<NewGoalUpdate> {
        let amount = ProgressAmount::new(self.amount)?;
        let proof = ProofAttachment::from_parts(self.proof_url, self.proof_type)?;
        let note = self.note.as_deref().and_then(crate::goals::non_blank);
        Ok(NewGoalUpdate {
            goal_id: goal_id.to_string(),
            user_id: user_id.to_string(),
            amount,
            note,
            proof,
        })
    }
}

/// Result of one committed ledger append.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressOutcome {
    pub update: GoalUpdate,
    /// Goal state after the append and re-evaluation.
    pub goal: Goal,
    /// Status change caused by this append, if any.
    pub transition: Option<GoalTransition>,
}
