//! Test-only helpers for constructing contract graphs.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

use crate::core::graph::ContractGraph;
use crate::core::types::{ContractState, ContractTransition};
use crate::document::{GraphDocument, TransitionRecord};
use crate::io::config::{DEFAULT_CONFIG_FILE, PlannerConfig, write_config};
use crate::io::graph_store::write_graph;
use crate::io::init::DEFAULT_GRAPH_FILE;

/// Create a bare state (no capabilities, tier 0, no metadata).
pub fn state(id: &str) -> ContractState {
    ContractState::new(id)
}

/// Create a transition leaving `source` with the given cost.
pub fn edge(id: &str, source: &str, cost: f64) -> ContractTransition {
    ContractTransition::new(id, source).with_cost(cost)
}

/// Create a document transition record with zero cost and no outputs.
pub fn record(id: &str, source: &str, target: &str) -> TransitionRecord {
    TransitionRecord {
        transition_id: id.to_string(),
        source_state_id: source.to_string(),
        target_state_id: target.to_string(),
        output_types: Vec::new(),
        cost: Default::default(),
    }
}

/// Build a document from bare state ids and `(id, source, target)` triples.
pub fn document(states: &[&str], transitions: &[(&str, &str, &str)]) -> GraphDocument {
    let mut doc = GraphDocument::empty();
    doc.states = states.iter().map(|id| state(id)).collect();
    doc.transitions = transitions
        .iter()
        .map(|(id, source, target)| record(id, source, target))
        .collect();
    doc.sort();
    doc
}

/// `S --t1--> A --t2--> Goal`.
pub fn chain_document() -> GraphDocument {
    document(&["S", "A", "Goal"], &[("t1", "S", "A"), ("t2", "A", "Goal")])
}

/// In-memory form of [`chain_document`].
pub fn chain_graph() -> ContractGraph {
    chain_document().to_graph()
}

/// Scratch project directory holding planner files.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `doc` as `graph.json` and return its path.
    pub fn write_graph(&self, doc: &GraphDocument) -> Result<PathBuf> {
        let path = self.path().join(DEFAULT_GRAPH_FILE);
        write_graph(&path, doc)?;
        Ok(path)
    }

    /// Write `cfg` as `planner.toml` and return its path.
    pub fn write_config(&self, cfg: &PlannerConfig) -> Result<PathBuf> {
        let path = self.path().join(DEFAULT_CONFIG_FILE);
        write_config(&path, cfg)?;
        Ok(path)
    }
}
