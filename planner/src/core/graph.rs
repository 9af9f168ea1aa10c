//! In-memory contract graph with reverse adjacency.

use std::collections::BTreeMap;

use crate::core::types::{ContractState, ContractTransition};

/// Read-only view the planner searches over.
///
/// Implementations must enumerate every state and must answer
/// `incoming_transitions` for any id, returning an empty slice for ids with
/// no incoming edges or ids not present in the graph.
pub trait PlanningGraph {
    /// Every known state, in any order.
    fn states(&self) -> Box<dyn Iterator<Item = &ContractState> + '_>;

    /// Every transition whose target is `node_id`, in any order.
    fn incoming_transitions(&self, node_id: &str) -> &[ContractTransition];
}

/// States keyed by id plus incoming transitions keyed by target id.
///
/// Transition sources are not required to name a known state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractGraph {
    states: BTreeMap<String, ContractState>,
    incoming: BTreeMap<String, Vec<ContractTransition>>,
}

impl ContractGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a state, keyed by its `node_id`.
    pub fn add_state(&mut self, state: ContractState) -> &mut Self {
        self.states.insert(state.node_id.clone(), state);
        self
    }

    /// Register `transition` as entering `target_state_id`.
    pub fn add_transition(
        &mut self,
        target_state_id: impl Into<String>,
        transition: ContractTransition,
    ) -> &mut Self {
        self.incoming
            .entry(target_state_id.into())
            .or_default()
            .push(transition);
        self
    }

    pub fn state(&self, node_id: &str) -> Option<&ContractState> {
        self.states.get(node_id)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.incoming.values().map(Vec::len).sum()
    }
}

impl PlanningGraph for ContractGraph {
    fn states(&self) -> Box<dyn Iterator<Item = &ContractState> + '_> {
        Box::new(self.states.values())
    }

    fn incoming_transitions(&self, node_id: &str) -> &[ContractTransition] {
        self.incoming.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }
}
