//! Database models for goals.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;

use goalgang_core::errors::{DatabaseError, Error, Result};
use goalgang_core::goals::{Goal, GoalStatus};

/// Parses a decimal stored as TEXT.
///
/// Unlike display-only fields, a ledger value that fails to parse is an
/// error: silently substituting zero would corrupt the goal's sum.
pub(crate) fn parse_decimal(value: &str, field_name: &str) -> Result<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|e| {
            log::error!("Failed to parse {} '{}': {}", field_name, value, e);
            Error::Database(DatabaseError::Internal(format!(
                "Stored {} '{}' is not a decimal: {}",
                field_name, value, e
            )))
        })
}

/// Database model for goals
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub group_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub target_value: String,
    pub current_value: String,
    pub unit: String,
    pub category: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_completed: bool,
    pub is_surpassed: bool,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<GoalDB> for Goal {
    type Error = Error;

    fn try_from(db: GoalDB) -> Result<Self> {
        Ok(Self {
            target_value: parse_decimal(&db.target_value, "target_value")?,
            current_value: parse_decimal(&db.current_value, "current_value")?,
            status: GoalStatus::from_flags(db.is_completed, db.is_surpassed, db.completed_at)?,
            id: db.id,
            user_id: db.user_id,
            group_id: db.group_id,
            title: db.title,
            description: db.description,
            unit: db.unit,
            category: db.category,
            start_date: db.start_date,
            end_date: db.end_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            group_id: domain.group_id,
            title: domain.title,
            description: domain.description,
            target_value: domain.target_value.to_string(),
            current_value: domain.current_value.to_string(),
            unit: domain.unit,
            category: domain.category,
            start_date: domain.start_date,
            end_date: domain.end_date,
            is_completed: domain.status.is_completed(),
            is_surpassed: domain.status.is_surpassed(),
            completed_at: domain.status.completed_at(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_db() -> GoalDB {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        GoalDB {
            id: "g1".to_string(),
            user_id: "u1".to_string(),
            group_id: None,
            title: "Read".to_string(),
            description: None,
            target_value: "12".to_string(),
            current_value: "12.5".to_string(),
            unit: "books".to_string(),
            category: None,
            start_date: at.date(),
            end_date: at.date(),
            is_completed: true,
            is_surpassed: true,
            completed_at: Some(at),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_goal_db_converts_status_flags() {
        let goal = Goal::try_from(sample_db()).unwrap();
        assert_eq!(goal.current_value, dec!(12.5));
        assert!(goal.status.is_surpassed());
        assert_eq!(GoalDB::from(goal), sample_db());
    }

    #[test]
    fn test_goal_db_rejects_inconsistent_flags() {
        let mut db = sample_db();
        db.is_completed = false;
        assert!(Goal::try_from(db).is_err());
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(parse_decimal("1e2", "amount").unwrap(), dec!(100));
        assert!(parse_decimal("abc", "amount").is_err());
    }
}
