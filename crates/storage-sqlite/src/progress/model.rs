//! Database models for ledger entries.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use goalgang_core::errors::{Error, Result};
use goalgang_core::progress::{GoalUpdate, ProofAttachment, ProofType};

use crate::goals::parse_decimal;

/// Database model for goal updates
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goal_updates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalUpdateDB {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub amount: String,
    pub note: Option<String>,
    pub proof_url: Option<String>,
    pub proof_type: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<GoalUpdateDB> for GoalUpdate {
    type Error = Error;

    fn try_from(db: GoalUpdateDB) -> Result<Self> {
        let proof_type = db
            .proof_type
            .as_deref()
            .map(str::parse::<ProofType>)
            .transpose()?;
        Ok(Self {
            amount: parse_decimal(&db.amount, "amount")?,
            proof: ProofAttachment::from_parts(db.proof_url, proof_type)?,
            id: db.id,
            goal_id: db.goal_id,
            user_id: db.user_id,
            note: db.note,
            created_at: db.created_at,
        })
    }
}

impl From<GoalUpdate> for GoalUpdateDB {
    fn from(domain: GoalUpdate) -> Self {
        let (proof_url, proof_type) = match domain.proof {
            Some(proof) => (Some(proof.url), Some(proof.proof_type.as_str().to_string())),
            None => (None, None),
        };
        Self {
            id: domain.id,
            goal_id: domain.goal_id,
            user_id: domain.user_id,
            amount: domain.amount.to_string(),
            note: domain.note,
            proof_url,
            proof_type,
            created_at: domain.created_at,
        }
    }
}
