//! Goal predicate evaluation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::types::ContractState;

/// Declarative predicate a target state must satisfy.
///
/// Empty sets and `None` fields impose no constraint, so the default value
/// matches every state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoalCondition {
    pub target_node_id: Option<String>,
    pub required_capabilities: BTreeSet<String>,
    /// Inclusive upper bound on `policy_tier`.
    pub policy_tier_max: Option<u32>,
    pub required_metadata_keys: BTreeSet<String>,
    /// At least one must be produced by the transition entering the goal.
    pub required_output_types: BTreeSet<String>,
}

impl GoalCondition {
    pub fn target(node_id: impl Into<String>) -> Self {
        Self {
            target_node_id: Some(node_id.into()),
            ..Self::default()
        }
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.required_capabilities.insert(capability.into());
        self
    }

    pub fn with_policy_tier_max(mut self, policy_tier_max: u32) -> Self {
        self.policy_tier_max = Some(policy_tier_max);
        self
    }

    pub fn with_metadata_key(mut self, key: impl Into<String>) -> Self {
        self.required_metadata_keys.insert(key.into());
        self
    }

    pub fn with_output_type(mut self, output_type: impl Into<String>) -> Self {
        self.required_output_types.insert(output_type.into());
        self
    }
}

/// True if `state` meets every configured state-level constraint of `goal`.
///
/// `required_output_types` is an edge constraint and is not checked here.
pub fn satisfies(state: &ContractState, goal: &GoalCondition) -> bool {
    if goal
        .target_node_id
        .as_ref()
        .is_some_and(|target| state.node_id != *target)
    {
        return false;
    }
    if !goal.required_capabilities.is_subset(&state.capabilities) {
        return false;
    }
    if goal
        .policy_tier_max
        .is_some_and(|max| state.policy_tier > max)
    {
        return false;
    }
    goal.required_metadata_keys
        .iter()
        .all(|key| state.metadata.contains_key(key))
}

/// True if `required` is empty or shares at least one tag with `output_types`.
pub fn transition_satisfies_output_goal<S: AsRef<str>>(
    output_types: &[S],
    required: &BTreeSet<String>,
) -> bool {
    if required.is_empty() {
        return true;
    }
    output_types
        .iter()
        .any(|output| required.contains(output.as_ref()))
}
