//! Goal-conditioned backward-chaining planner.

use thiserror::Error;
use tracing::debug;

use crate::core::goal::{GoalCondition, satisfies};
use crate::core::graph::PlanningGraph;
use crate::core::search::{SearchOutcome, backward_search};
use crate::core::types::{ContractState, FailureReason, Plan, PlanResult, PlanStep};

/// Depth budget used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Planner construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("max_depth must be >= 1 (got {max_depth})")]
    InvalidMaxDepth { max_depth: usize },
}

/// Finds the fewest-transition path from a current state to any state
/// satisfying a goal.
///
/// Holds only its depth budget; every [`plan`](Self::plan) call is an
/// independent, deterministic computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackwardChainingPlanner {
    max_depth: usize,
}

impl Default for BackwardChainingPlanner {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BackwardChainingPlanner {
    pub fn new(max_depth: usize) -> Result<Self, PlannerError> {
        if max_depth < 1 {
            return Err(PlannerError::InvalidMaxDepth { max_depth });
        }
        Ok(Self { max_depth })
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Plan from `current_state` to the nearest state satisfying `goal`.
    ///
    /// Goal candidates are searched in lexicographic id order; among equally
    /// short plans the first candidate wins. Without a plan, the reason is
    /// chosen as depth-exceeded, then cycle-detected, then
    /// `RequiredTransitionNotInGraph`. The last also covers "no state
    /// satisfies the goal at all".
    pub fn plan<G>(
        &self,
        graph: &G,
        goal: &GoalCondition,
        current_state: &ContractState,
    ) -> PlanResult
    where
        G: PlanningGraph + ?Sized,
    {
        if satisfies(current_state, goal) {
            debug!(current_state_id = %current_state.node_id, "goal already satisfied");
            return PlanResult::GoalAlreadySatisfied {
                current_state_id: current_state.node_id.clone(),
            };
        }

        let mut goal_state_ids: Vec<&str> = graph
            .states()
            .filter(|state| satisfies(state, goal))
            .map(|state| state.node_id.as_str())
            .collect();
        goal_state_ids.sort_unstable();
        goal_state_ids.dedup();

        if goal_state_ids.is_empty() {
            debug!(target_node_id = ?goal.target_node_id, "no state satisfies goal");
            return self.not_in_graph(goal);
        }
        debug!(
            current_state_id = %current_state.node_id,
            candidates = goal_state_ids.len(),
            max_depth = self.max_depth,
            "searching goal candidates"
        );

        let mut best: Option<Vec<PlanStep>> = None;
        let mut depth_exceeded = false;
        let mut cycle_seen = false;

        for goal_id in goal_state_ids {
            match backward_search(graph, &current_state.node_id, goal_id, goal, self.max_depth) {
                SearchOutcome::Found(steps) => {
                    if best.as_ref().is_none_or(|current| steps.len() < current.len()) {
                        debug!(goal_id, steps = steps.len(), "new best plan");
                        best = Some(steps);
                    }
                }
                SearchOutcome::Unreachable => {}
                SearchOutcome::CycleOnly => cycle_seen = true,
                SearchOutcome::DepthExceeded => depth_exceeded = true,
            }
        }

        if let Some(steps) = best {
            return PlanResult::Plan(Plan::new(steps));
        }

        let reason = if depth_exceeded {
            FailureReason::MaxDepthExceeded {
                max_depth: self.max_depth,
            }
        } else if cycle_seen {
            FailureReason::CycleDetected
        } else {
            return self.not_in_graph(goal);
        };
        debug!(%reason, "no plan found");
        PlanResult::NoPlanFound { reason }
    }

    fn not_in_graph(&self, goal: &GoalCondition) -> PlanResult {
        PlanResult::NoPlanFound {
            reason: FailureReason::RequiredTransitionNotInGraph {
                goal_node_id: goal.target_node_id.clone(),
            },
        }
    }
}
