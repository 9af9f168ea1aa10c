//! Conversion from backward search paths to forward plan steps.

use crate::core::types::PlanStep;

/// One edge recorded while walking backward from a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackwardEdge<'g> {
    pub transition_id: &'g str,
    /// State the transition leaves (closer to the start).
    pub predecessor_id: &'g str,
    /// State the transition enters (closer to the goal).
    pub current_id: &'g str,
}

/// Reverse a goal-to-start path into forward, zero-indexed plan steps.
pub fn backward_path_to_steps(path: &[BackwardEdge<'_>]) -> Vec<PlanStep> {
    path.iter()
        .rev()
        .enumerate()
        .map(|(step_index, edge)| {
            PlanStep::new(
                edge.transition_id,
                edge.predecessor_id,
                edge.current_id,
                step_index,
            )
        })
        .collect()
}
