//! Semantic invariants not expressible via JSON Schema.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::document::{GRAPH_DOCUMENT_VERSION, GraphDocument};

static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+$").unwrap());

/// Check semantic invariants of a graph document:
/// - Supported `version`
/// - No duplicate state ids or transition ids
/// - Ids are non-empty and contain no whitespace
/// - Costs are finite
pub fn validate_invariants(doc: &GraphDocument) -> Vec<String> {
    let mut errors = Vec::new();

    if doc.version != GRAPH_DOCUMENT_VERSION {
        errors.push(format!(
            "unsupported version {} (expected {})",
            doc.version, GRAPH_DOCUMENT_VERSION
        ));
    }

    let mut seen_states = HashSet::new();
    for state in &doc.states {
        check_id(&mut errors, "state", &state.node_id);
        if !seen_states.insert(state.node_id.as_str()) {
            errors.push(format!("duplicate state id '{}'", state.node_id));
        }
    }

    let mut seen_transitions = HashSet::new();
    for record in &doc.transitions {
        let id = record.transition_id.as_str();
        check_id(&mut errors, "transition", id);
        check_id(&mut errors, &format!("{id}: source"), &record.source_state_id);
        check_id(&mut errors, &format!("{id}: target"), &record.target_state_id);
        if !seen_transitions.insert(id) {
            errors.push(format!("duplicate transition id '{id}'"));
        }
        if !record.cost.total_cost().is_finite() {
            errors.push(format!("{id}: cost must be finite"));
        }
    }

    errors
}

/// Transition endpoints naming states absent from the document.
///
/// These are tolerated by the planner, so callers report them as warnings.
pub fn dangling_references(doc: &GraphDocument) -> Vec<String> {
    let known: BTreeSet<&str> = doc.states.iter().map(|s| s.node_id.as_str()).collect();
    let mut warnings = Vec::new();
    for record in &doc.transitions {
        if !known.contains(record.source_state_id.as_str()) {
            warnings.push(format!(
                "{}: source '{}' is not a known state",
                record.transition_id, record.source_state_id
            ));
        }
        if !known.contains(record.target_state_id.as_str()) {
            warnings.push(format!(
                "{}: target '{}' is not a known state",
                record.transition_id, record.target_state_id
            ));
        }
    }
    warnings
}

fn check_id(errors: &mut Vec<String>, what: &str, id: &str) {
    if !ID_RE.is_match(id) {
        errors.push(format!("{what} id '{id}' must be non-empty without whitespace"));
    }
}
