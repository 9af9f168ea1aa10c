//! Graph document load/save helpers with schema + invariant validation.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::graph::ContractGraph;
use crate::core::invariants::{dangling_references, validate_invariants};
use crate::document::GraphDocument;
use crate::io::format::{read_value, write_value};

/// JSON Schema every graph document must satisfy, whatever its format.
pub const GRAPH_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/contract_graph/v1.schema.json"
));

/// A validated graph document plus the graph built from it.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub document: GraphDocument,
    pub graph: ContractGraph,
    /// Dangling endpoint references (tolerated, reported only).
    pub warnings: Vec<String>,
}

/// Load and validate a graph document from disk (schema + invariants).
pub fn load_graph(path: &Path) -> Result<LoadedGraph> {
    debug!(path = %path.display(), "loading graph");
    let value = read_value(path)?;
    let loaded =
        graph_from_value(value).with_context(|| format!("load graph {}", path.display()))?;
    debug!(
        states = loaded.graph.state_count(),
        transitions = loaded.graph.transition_count(),
        "graph loaded"
    );
    Ok(loaded)
}

/// Validate an already-parsed document value and build the graph.
pub fn graph_from_value(value: Value) -> Result<LoadedGraph> {
    validate_schema(&value)?;
    let document: GraphDocument =
        serde_json::from_value(value).context("deserialize graph document")?;
    let errors = validate_invariants(&document);
    if !errors.is_empty() {
        return Err(anyhow!("graph invariants failed: {}", errors.join("; ")));
    }
    let warnings = dangling_references(&document);
    for warning in &warnings {
        warn!(%warning, "dangling reference");
    }
    let graph = document.to_graph();
    Ok(LoadedGraph {
        document,
        graph,
        warnings,
    })
}

/// Write a graph document in canonical order, in the format implied by `path`.
pub fn write_graph(path: &Path, document: &GraphDocument) -> Result<()> {
    let errors = validate_invariants(document);
    if !errors.is_empty() {
        return Err(anyhow!("refusing to write invalid graph: {}", errors.join("; ")));
    }
    let mut sorted = document.clone();
    sorted.sort();
    write_value(path, &sorted)
}

fn validate_schema(document: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(GRAPH_SCHEMA).context("parse graph schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    let messages = compiled
        .iter_errors(document)
        .map(|err| err.to_string())
        .collect::<Vec<_>>();
    if !messages.is_empty() {
        return Err(anyhow!(
            "graph schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}
