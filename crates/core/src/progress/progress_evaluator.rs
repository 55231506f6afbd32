//! Goal state evaluation.
//!
//! Pure functions deriving a goal's status from its target and accumulated
//! progress. They report *transitions* rather than states so callers can
//! emit notifications exactly once: a status never moves backward, hence
//! each transition kind can occur at most once per goal.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::progress_model::ProgressAmount;
use crate::errors::{Error, Result, ValidationError};
use crate::goals::{Goal, GoalStatus};

/// Status change detected by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalTransition {
    /// The goal reached its target for the first time. `surpassed` is set
    /// when the same step also went strictly past the target.
    Completed { surpassed: bool },
    /// An already completed goal went strictly past its target.
    Surpassed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEvaluation {
    pub status: GoalStatus,
    pub transition: Option<GoalTransition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvaluation {
    pub current_value: Decimal,
    pub status: GoalStatus,
    pub transition: Option<GoalTransition>,
}

/// Derives the status for `current_value` against `target_value`.
///
/// Reaching the target exactly completes a goal; exceeding it completes and
/// surpasses it. Status only moves forward: a completed goal whose target
/// was raised stays completed, and `completed_at` is never replaced.
pub fn evaluate_status(
    previous: GoalStatus,
    current_value: Decimal,
    target_value: Decimal,
    now: NaiveDateTime,
) -> StatusEvaluation {
    let reached = current_value >= target_value;
    let exceeded = current_value > target_value;

    match previous {
        GoalStatus::InProgress if exceeded => StatusEvaluation {
            status: GoalStatus::Surpassed { completed_at: now },
            transition: Some(GoalTransition::Completed { surpassed: true }),
        },
        GoalStatus::InProgress if reached => StatusEvaluation {
            status: GoalStatus::Completed { completed_at: now },
            transition: Some(GoalTransition::Completed { surpassed: false }),
        },
        GoalStatus::Completed { completed_at } if exceeded => StatusEvaluation {
            status: GoalStatus::Surpassed { completed_at },
            transition: Some(GoalTransition::Surpassed),
        },
        unchanged => StatusEvaluation {
            status: unchanged,
            transition: None,
        },
    }
}

/// Applies one ledger amount to `goal` and evaluates the resulting status.
///
/// Fails with an invalid-amount error when the new total does not fit in a
/// `Decimal`; the goal is left untouched in that case.
pub fn apply_progress(
    goal: &Goal,
    amount: ProgressAmount,
    now: NaiveDateTime,
) -> Result<ProgressEvaluation> {
    let current_value = goal
        .current_value
        .checked_add(amount.value())
        .ok_or_else(|| {
            Error::Validation(ValidationError::InvalidAmount(format!(
                "adding {} to {} exceeds the largest supported value",
                amount.value(),
                goal.current_value
            )))
        })?;
    let StatusEvaluation { status, transition } =
        evaluate_status(goal.status, current_value, goal.target_value, now);
    Ok(ProgressEvaluation {
        current_value,
        status,
        transition,
    })
}

/// `round(current / target * 100)`, halves rounded up. Zero for a
/// non-positive target; saturates at `u32::MAX`.
pub fn progress_percent(current_value: Decimal, target_value: Decimal) -> u32 {
    if target_value <= Decimal::ZERO {
        return 0;
    }
    current_value
        .checked_div(target_value)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|percent| {
            percent
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
                .unwrap_or(if percent.is_sign_negative() { 0 } else { u32::MAX })
        })
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_below_target_stays_in_progress() {
        let eval = evaluate_status(GoalStatus::InProgress, dec!(499.99), dec!(500), at(9));
        assert_eq!(eval.status, GoalStatus::InProgress);
        assert_eq!(eval.transition, None);
    }

    #[test]
    fn test_exact_target_completes_without_surpassing() {
        let eval = evaluate_status(GoalStatus::InProgress, dec!(500), dec!(500), at(9));
        assert_eq!(eval.status, GoalStatus::Completed { completed_at: at(9) });
        assert!(eval.status.is_completed());
        assert!(!eval.status.is_surpassed());
        assert_eq!(
            eval.transition,
            Some(GoalTransition::Completed { surpassed: false })
        );
    }

    #[test]
    fn test_overshoot_completes_and_surpasses_in_one_step() {
        let eval = evaluate_status(GoalStatus::InProgress, dec!(501), dec!(500), at(9));
        assert_eq!(eval.status, GoalStatus::Surpassed { completed_at: at(9) });
        assert_eq!(
            eval.transition,
            Some(GoalTransition::Completed { surpassed: true })
        );
    }

    #[test]
    fn test_completed_goal_keeps_completed_at_when_surpassed() {
        let previous = GoalStatus::Completed { completed_at: at(9) };
        let eval = evaluate_status(previous, dec!(550), dec!(500), at(15));
        assert_eq!(eval.status, GoalStatus::Surpassed { completed_at: at(9) });
        assert_eq!(eval.transition, Some(GoalTransition::Surpassed));
    }

    #[test]
    fn test_completed_goal_at_target_reports_nothing() {
        let previous = GoalStatus::Completed { completed_at: at(9) };
        let eval = evaluate_status(previous, dec!(500), dec!(500), at(15));
        assert_eq!(eval.status, previous);
        assert_eq!(eval.transition, None);
    }

    #[test]
    fn test_surpassed_goal_is_terminal() {
        let previous = GoalStatus::Surpassed { completed_at: at(9) };
        let eval = evaluate_status(previous, dec!(900), dec!(500), at(15));
        assert_eq!(eval.status, previous);
        assert_eq!(eval.transition, None);
    }

    #[test]
    fn test_status_never_moves_backward_when_target_is_raised() {
        let completed = GoalStatus::Completed { completed_at: at(9) };
        let eval = evaluate_status(completed, dec!(500), dec!(1000), at(15));
        assert_eq!(eval.status, completed);
        assert_eq!(eval.transition, None);

        let surpassed = GoalStatus::Surpassed { completed_at: at(9) };
        let eval = evaluate_status(surpassed, dec!(500), dec!(500), at(15));
        assert_eq!(eval.status, surpassed);
    }

    #[test]
    fn test_fractional_amounts_are_exact() {
        let mut current = Decimal::ZERO;
        for _ in 0..10 {
            current += dec!(0.1);
        }
        let eval = evaluate_status(GoalStatus::InProgress, current, dec!(1), at(9));
        assert_eq!(eval.status, GoalStatus::Completed { completed_at: at(9) });
    }

    #[test]
    fn test_progress_percent_rounding() {
        assert_eq!(progress_percent(dec!(200), dec!(500)), 40);
        assert_eq!(progress_percent(dec!(1), dec!(3)), 33);
        assert_eq!(progress_percent(dec!(2), dec!(3)), 67);
        assert_eq!(progress_percent(dec!(1), dec!(200)), 1);
        assert_eq!(progress_percent(dec!(550), dec!(500)), 110);
        assert_eq!(progress_percent(dec!(10), Decimal::ZERO), 0);
    }

    #[test]
    fn test_progress_percent_saturates_for_tiny_targets() {
        assert_eq!(progress_percent(dec!(1e27), dec!(0.5)), u32::MAX);
        assert_eq!(progress_percent(Decimal::MAX, dec!(0.0000001)), u32::MAX);
        assert_eq!(progress_percent(dec!(50000000), dec!(0.001)), u32::MAX);
        assert_eq!(progress_percent(dec!(1), dec!(0.001)), 100_000);
    }

    #[test]
    fn test_apply_progress_rejects_overflowing_total() {
        let day = at(9).date();
        let goal = Goal {
            id: "g1".to_string(),
            user_id: "u1".to_string(),
            group_id: None,
            title: "Save".to_string(),
            description: None,
            target_value: dec!(100),
            current_value: Decimal::MAX - dec!(1),
            unit: "$".to_string(),
            category: None,
            start_date: day,
            end_date: day,
            status: GoalStatus::Surpassed {
                completed_at: at(8),
            },
            created_at: at(8),
            updated_at: at(8),
        };
        let err = apply_progress(&goal, ProgressAmount::new(dec!(2)).unwrap(), at(9)).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidAmount(_))
        ));

        let eval = apply_progress(&goal, ProgressAmount::new(dec!(1)).unwrap(), at(9)).unwrap();
        assert_eq!(eval.current_value, Decimal::MAX);
    }
}
