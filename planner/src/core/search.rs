//! Backward breadth-first search from one goal candidate.

use std::cmp::Ordering;
use std::collections::VecDeque;

use tracing::trace;

use crate::core::goal::{GoalCondition, transition_satisfies_output_goal};
use crate::core::graph::PlanningGraph;
use crate::core::path::{BackwardEdge, backward_path_to_steps};
use crate::core::types::{ContractTransition, PlanStep};

/// Result of searching back from a single goal candidate.
///
/// Internal to the planner; mapped to [`crate::core::types::FailureReason`]
/// only after every candidate has been searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SearchOutcome {
    /// Forward-ordered steps from the start to the candidate.
    Found(Vec<PlanStep>),
    /// Candidate is disconnected from the start.
    Unreachable,
    /// Some branch revisited a state on its own path; none reached the start.
    CycleOnly,
    /// Some branch hit the depth budget; none reached the start.
    DepthExceeded,
}

/// A queued branch: the state reached so far plus its path-local history.
struct Frontier<'g> {
    node_id: &'g str,
    visited: Vec<&'g str>,
    path: Vec<BackwardEdge<'g>>,
}

/// Search incoming edges from `goal_id` back to `start_id`.
///
/// Strict FIFO order yields the fewest transitions, not the lowest cost.
/// Cycle detection is per path: a state may appear on several branches.
pub(crate) fn backward_search<'g, G>(
    graph: &'g G,
    start_id: &str,
    goal_id: &'g str,
    goal: &GoalCondition,
    max_depth: usize,
) -> SearchOutcome
where
    G: PlanningGraph + ?Sized,
{
    let mut queue = VecDeque::from([Frontier {
        node_id: goal_id,
        visited: vec![goal_id],
        path: Vec::new(),
    }]);
    let mut depth_exceeded = false;
    let mut cycle_seen = false;

    while let Some(entry) = queue.pop_front() {
        if entry.node_id == start_id && !entry.path.is_empty() {
            return SearchOutcome::Found(backward_path_to_steps(&entry.path));
        }

        // Checked after the start test so a path of exactly `max_depth` is accepted.
        if entry.path.len() >= max_depth {
            trace!(goal_id, node_id = entry.node_id, max_depth, "depth budget exhausted");
            depth_exceeded = true;
            continue;
        }

        let mut incoming: Vec<&'g ContractTransition> =
            graph.incoming_transitions(entry.node_id).iter().collect();
        incoming.sort_by(|left, right| deterministic_order(left, right));

        let entering_goal = entry.node_id == goal_id;
        for transition in incoming {
            if entering_goal
                && !transition_satisfies_output_goal(
                    transition.output_types.as_slice(),
                    &goal.required_output_types,
                )
            {
                continue;
            }

            let predecessor = transition.source_state_id.as_str();
            if entry.visited.contains(&predecessor) {
                trace!(
                    goal_id,
                    node_id = entry.node_id,
                    predecessor,
                    transition_id = transition.transition_id.as_str(),
                    "cycle on path"
                );
                cycle_seen = true;
                continue;
            }

            let mut visited = entry.visited.clone();
            visited.push(predecessor);
            let mut path = entry.path.clone();
            path.push(BackwardEdge {
                transition_id: &transition.transition_id,
                predecessor_id: predecessor,
                current_id: entry.node_id,
            });
            queue.push_back(Frontier {
                node_id: predecessor,
                visited,
                path,
            });
        }
    }

    if depth_exceeded {
        SearchOutcome::DepthExceeded
    } else if cycle_seen {
        SearchOutcome::CycleOnly
    } else {
        SearchOutcome::Unreachable
    }
}

/// Sibling order: `(total_cost, transition_id)` ascending.
///
/// `-0.0` and `0.0` compare equal so the id decides; remaining `f64` values
/// use `total_cmp`.
fn deterministic_order(left: &ContractTransition, right: &ContractTransition) -> Ordering {
    sort_key(left.cost.total_cost())
        .total_cmp(&sort_key(right.cost.total_cost()))
        .then_with(|| left.transition_id.cmp(&right.transition_id))
}

fn sort_key(cost: f64) -> f64 {
    if cost == 0.0 { 0.0 } else { cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::ContractGraph;
    use crate::test_support::{chain_graph, edge};

    fn search(
        graph: &ContractGraph,
        start: &str,
        goal_id: &str,
        max_depth: usize,
    ) -> SearchOutcome {
        let goal = GoalCondition::default();
        backward_search(graph, start, goal_id, &goal, max_depth)
    }

    #[test]
    fn finds_forward_ordered_steps() {
        let graph = chain_graph();
        let outcome = search(&graph, "S", "Goal", 10);
        assert_eq!(
            outcome,
            SearchOutcome::Found(vec![
                PlanStep::new("t1", "S", "A", 0),
                PlanStep::new("t2", "A", "Goal", 1),
            ])
        );
    }

    #[test]
    fn path_of_exactly_max_depth_is_accepted() {
        let graph = chain_graph();
        assert!(matches!(
            search(&graph, "S", "Goal", 2),
            SearchOutcome::Found(steps) if steps.len() == 2
        ));
    }

    #[test]
    fn depth_budget_exhaustion_is_reported() {
        let graph = chain_graph();
        assert_eq!(search(&graph, "S", "Goal", 1), SearchOutcome::DepthExceeded);
    }

    #[test]
    fn isolated_goal_is_unreachable() {
        let mut graph = ContractGraph::new();
        graph.add_state(crate::core::types::ContractState::new("Goal"));
        assert_eq!(search(&graph, "S", "Goal", 10), SearchOutcome::Unreachable);
    }

    #[test]
    fn closed_loop_reports_cycle() {
        let mut graph = ContractGraph::new();
        graph
            .add_transition("Goal", edge("t1", "X", 1.0))
            .add_transition("X", edge("t2", "Goal", 1.0));
        assert_eq!(search(&graph, "S", "Goal", 10), SearchOutcome::CycleOnly);
    }

    #[test]
    fn depth_signal_outranks_cycle_signal() {
        let mut graph = ContractGraph::new();
        graph
            .add_transition("Goal", edge("loop", "Goal", 0.0))
            .add_transition("Goal", edge("t1", "A", 1.0))
            .add_transition("A", edge("t2", "B", 1.0));
        assert_eq!(search(&graph, "S", "Goal", 2), SearchOutcome::DepthExceeded);
    }

    #[test]
    fn cheaper_sibling_is_discovered_first() {
        let mut graph = ContractGraph::new();
        graph
            .add_transition("Goal", edge("t-a", "S", 2.0))
            .add_transition("Goal", edge("t-b", "S", 1.0));
        assert_eq!(
            search(&graph, "S", "Goal", 10),
            SearchOutcome::Found(vec![PlanStep::new("t-b", "S", "Goal", 0)])
        );
    }

    #[test]
    fn equal_cost_siblings_break_ties_by_id() {
        let mut graph = ContractGraph::new();
        graph
            .add_transition("Goal", edge("t-b", "S", 1.0))
            .add_transition("Goal", edge("t-a", "S", 1.0));
        assert_eq!(
            search(&graph, "S", "Goal", 10),
            SearchOutcome::Found(vec![PlanStep::new("t-a", "S", "Goal", 0)])
        );
    }

    #[test]
    fn signed_zero_costs_tie_and_fall_back_to_id() {
        let mut graph = ContractGraph::new();
        graph
            .add_transition("Goal", edge("a", "S", 0.0))
            .add_transition("Goal", edge("b", "S", -0.0));
        assert_eq!(
            search(&graph, "S", "Goal", 10),
            SearchOutcome::Found(vec![PlanStep::new("a", "S", "Goal", 0)])
        );
    }

    #[test]
    fn output_gate_filters_only_the_goal_edge() {
        let mut graph = ContractGraph::new();
        graph
            .add_transition("Goal", edge("plain", "A", 0.0))
            .add_transition("Goal", edge("report", "A", 5.0).with_output_type("Report"))
            .add_transition("A", edge("t1", "S", 0.0));
        let goal = GoalCondition::default().with_output_type("Report");

        assert_eq!(
            backward_search(&graph, "S", "Goal", &goal, 10),
            SearchOutcome::Found(vec![
                PlanStep::new("t1", "S", "A", 0),
                PlanStep::new("report", "A", "Goal", 1),
            ])
        );
    }

    #[test]
    fn output_gate_with_no_qualifying_edge_is_unreachable() {
        let graph = chain_graph();
        let goal = GoalCondition::default().with_output_type("Report");
        assert_eq!(
            backward_search(&graph, "S", "Goal", &goal, 10),
            SearchOutcome::Unreachable
        );
    }
}
