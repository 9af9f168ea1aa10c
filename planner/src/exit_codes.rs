//! Stable exit codes for planner CLI commands.

use crate::core::types::PlanResult;

/// Command succeeded, or `planner plan` found a plan.
pub const OK: i32 = 0;
/// Command failed due to invalid config, documents, arguments, or I/O errors.
pub const INVALID: i32 = 1;
/// `planner plan` found the current state already satisfies the goal.
pub const SATISFIED: i32 = 2;
/// `planner plan` found no plan.
pub const NO_PLAN: i32 = 3;

/// Exit code reported for a planning outcome.
pub fn for_result(result: &PlanResult) -> i32 {
    match result {
        PlanResult::Plan(_) => OK,
        PlanResult::GoalAlreadySatisfied { .. } => SATISFIED,
        PlanResult::NoPlanFound { .. } => NO_PLAN,
    }
}
