//! On-disk contract graph document (`graph.json` / `graph.toml`).

use serde::{Deserialize, Serialize};

use crate::core::graph::ContractGraph;
use crate::core::types::{ContractState, ContractTransition, TransitionCost};

/// Current graph document schema version.
pub const GRAPH_DOCUMENT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GraphDocument {
    pub version: u32,
    #[serde(default)]
    pub states: Vec<ContractState>,
    #[serde(default)]
    pub transitions: Vec<TransitionRecord>,
}

/// A transition with its target spelled out, as stored in documents.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TransitionRecord {
    pub transition_id: String,
    pub source_state_id: String,
    pub target_state_id: String,
    #[serde(default)]
    pub output_types: Vec<String>,
    #[serde(default)]
    pub cost: TransitionCost,
}

impl TransitionRecord {
    pub fn to_transition(&self) -> ContractTransition {
        ContractTransition {
            transition_id: self.transition_id.clone(),
            source_state_id: self.source_state_id.clone(),
            output_types: self.output_types.clone(),
            cost: self.cost,
        }
    }
}

impl GraphDocument {
    pub fn empty() -> Self {
        Self {
            version: GRAPH_DOCUMENT_VERSION,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Canonical order: states by id, transitions by `(target, id)`.
    pub fn sort(&mut self) {
        self.states.sort_by(|a, b| a.node_id.cmp(&b.node_id));
        self.transitions.sort_by(|a, b| {
            a.target_state_id
                .cmp(&b.target_state_id)
                .then_with(|| a.transition_id.cmp(&b.transition_id))
        });
    }

    pub fn to_graph(&self) -> ContractGraph {
        let mut graph = ContractGraph::new();
        for state in &self.states {
            graph.add_state(state.clone());
        }
        for record in &self.transitions {
            graph.add_transition(record.target_state_id.clone(), record.to_transition());
        }
        graph
    }
}

/// Starter graph written by `planner init`: `S -> A -> Goal`.
pub fn starter_document() -> GraphDocument {
    let mut doc = GraphDocument::empty();
    doc.states = vec![
        ContractState::new("S"),
        ContractState::new("A").with_capability("draft"),
        ContractState::new("Goal")
            .with_capability("draft")
            .with_capability("publish"),
    ];
    doc.transitions = vec![
        TransitionRecord {
            transition_id: "t1".to_string(),
            source_state_id: "S".to_string(),
            target_state_id: "A".to_string(),
            output_types: vec!["Draft".to_string()],
            cost: TransitionCost::new(1.0),
        },
        TransitionRecord {
            transition_id: "t2".to_string(),
            source_state_id: "A".to_string(),
            target_state_id: "Goal".to_string(),
            output_types: vec!["Release".to_string()],
            cost: TransitionCost::new(1.0),
        },
    ];
    doc.sort();
    doc
}
