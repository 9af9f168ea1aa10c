//! Validation of graph documents for `planner validate`.

use std::path::Path;

use anyhow::Result;

use crate::io::graph_store::load_graph;

/// Counts and warnings for a graph document that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSummary {
    pub states: usize,
    pub transitions: usize,
    /// Dangling endpoint references; tolerated by the planner.
    pub warnings: Vec<String>,
}

/// Validate a graph document (schema + invariants) and summarize it.
pub fn validate_graph_file(path: &Path) -> Result<GraphSummary> {
    let loaded = load_graph(path)?;
    Ok(GraphSummary {
        states: loaded.graph.state_count(),
        transitions: loaded.graph.transition_count(),
        warnings: loaded.warnings,
    })
}
