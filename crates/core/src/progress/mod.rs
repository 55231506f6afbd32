//! Progress module - the append-only ledger of goal updates and the
//! evaluator deriving goal status from it.

mod progress_evaluator;
mod progress_model;
mod progress_service;
mod progress_traits;


pub use progress_evaluator::{
    apply_progress, evaluate_status, progress_percent, GoalTransition, ProgressEvaluation,
    StatusEvaluation,
};
pub use progress_model::{
    GoalUpdate, NewGoalUpdate, ProgressAmount, ProgressOutcome, ProgressSubmission,
    ProofAttachment, ProofType,
};
pub use progress_service::ProgressService;
pub use progress_traits::{ProgressRepositoryTrait, ProgressServiceTrait};
