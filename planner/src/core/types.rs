//! Shared deterministic types for planning.
//!
//! These types define stable contracts between the graph, the goal predicate
//! and the planner. They carry no I/O and serialize deterministically
//! (`BTreeSet`/`BTreeMap` for every unordered collection).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node in the planning graph: one declared system configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractState {
    pub node_id: String,
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    #[serde(default)]
    pub policy_tier: u32,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl ContractState {
    /// State with no capabilities, tier 0 and empty metadata.
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            capabilities: BTreeSet::new(),
            policy_tier: 0,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    pub fn with_policy_tier(mut self, policy_tier: u32) -> Self {
        self.policy_tier = policy_tier;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Cost attached to a transition.
///
/// Only used to order sibling transitions deterministically; the planner
/// never minimizes it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransitionCost {
    pub total_cost: f64,
}

impl TransitionCost {
    pub fn new(total_cost: f64) -> Self {
        Self { total_cost }
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}

/// A directed, named edge between two states.
///
/// The target is implicit: it is the state whose incoming list holds the
/// transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTransition {
    pub transition_id: String,
    pub source_state_id: String,
    #[serde(default)]
    pub output_types: Vec<String>,
    #[serde(default)]
    pub cost: TransitionCost,
}

impl ContractTransition {
    pub fn new(transition_id: impl Into<String>, source_state_id: impl Into<String>) -> Self {
        Self {
            transition_id: transition_id.into(),
            source_state_id: source_state_id.into(),
            output_types: Vec::new(),
            cost: TransitionCost::default(),
        }
    }

    pub fn with_output_type(mut self, output_type: impl Into<String>) -> Self {
        self.output_types.push(output_type.into());
        self
    }

    pub fn with_cost(mut self, total_cost: f64) -> Self {
        self.cost = TransitionCost::new(total_cost);
        self
    }
}

/// One transition application inside a [`Plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub transition_id: String,
    pub pre_state_id: String,
    pub post_state_id: String,
    /// Zero-based position in forward execution order.
    pub step_index: usize,
}

impl PlanStep {
    pub fn new(
        transition_id: impl Into<String>,
        pre_state_id: impl Into<String>,
        post_state_id: impl Into<String>,
        step_index: usize,
    ) -> Self {
        Self {
            transition_id: transition_id.into(),
            pre_state_id: pre_state_id.into(),
            post_state_id: post_state_id.into(),
            step_index,
        }
    }
}

/// Ordered steps from the current state to a goal-satisfying state.
///
/// Step 0 leaves the current state. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    steps: Vec<PlanStep>,
}

impl Plan {
    pub fn new(steps: Vec<PlanStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Id of the state the plan ends in, if it has any steps.
    pub fn final_state_id(&self) -> Option<&str> {
        self.steps.last().map(|step| step.post_state_id.as_str())
    }

    /// Transition ids in execution order.
    pub fn transition_ids(&self) -> Vec<&str> {
        self.steps
            .iter()
            .map(|step| step.transition_id.as_str())
            .collect()
    }
}

/// Why no plan could be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// A branch revisited a state on its own path and no path reached the start.
    CycleDetected,
    /// At least one branch ran out of depth budget before reaching the start.
    MaxDepthExceeded { max_depth: usize },
    /// No goal candidate exists, or none is connected to the current state.
    RequiredTransitionNotInGraph { goal_node_id: Option<String> },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleDetected => {
                write!(f, "cycle detected and no path reaches the current state")
            }
            Self::MaxDepthExceeded { max_depth } => {
                write!(f, "no path within max depth {max_depth}")
            }
            Self::RequiredTransitionNotInGraph {
                goal_node_id: Some(goal_node_id),
            } => write!(f, "no transition path reaches goal '{goal_node_id}'"),
            Self::RequiredTransitionNotInGraph { goal_node_id: None } => {
                write!(f, "no transition path reaches any goal state")
            }
        }
    }
}

/// Outcome of a single planning call.
///
/// Exactly one variant applies; callers match on all three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlanResult {
    Plan(Plan),
    GoalAlreadySatisfied { current_state_id: String },
    NoPlanFound { reason: FailureReason },
}

impl PlanResult {
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Self::Plan(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match self {
            Self::NoPlanFound { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn is_plan(&self) -> bool {
        matches!(self, Self::Plan(_))
    }
}
