//! Goals module - domain models, services, and traits.

mod goals_model;
mod goals_service;
mod goals_traits;


pub(crate) use goals_model::non_blank;
pub use goals_model::{
    Goal, GoalEdit, GoalEditOutcome, GoalFilter, GoalStatus, GoalStatusFilter, GoalSummary,
    GoalWithUpdates, NewGoal,
};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
