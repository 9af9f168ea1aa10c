//! Goal condition files and CLI overrides.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::goal::GoalCondition;
use crate::io::format::read_value;

/// Goal constraints supplied on the command line.
///
/// Scalars replace the file value; sets are unioned with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalOverrides {
    pub target_node_id: Option<String>,
    pub capabilities: Vec<String>,
    pub policy_tier_max: Option<u32>,
    pub metadata_keys: Vec<String>,
    pub output_types: Vec<String>,
}

impl GoalOverrides {
    pub fn apply(&self, mut goal: GoalCondition) -> GoalCondition {
        if let Some(target) = &self.target_node_id {
            goal.target_node_id = Some(target.clone());
        }
        if let Some(max) = self.policy_tier_max {
            goal.policy_tier_max = Some(max);
        }
        goal.required_capabilities
            .extend(self.capabilities.iter().cloned());
        goal.required_metadata_keys
            .extend(self.metadata_keys.iter().cloned());
        goal.required_output_types
            .extend(self.output_types.iter().cloned());
        goal
    }
}

/// Load a goal condition from a JSON or TOML file.
pub fn load_goal(path: &Path) -> Result<GoalCondition> {
    let value = read_value(path)?;
    let goal: GoalCondition = serde_json::from_value(value)
        .with_context(|| format!("deserialize goal {}", path.display()))?;
    debug!(path = %path.display(), target_node_id = ?goal.target_node_id, "goal loaded");
    Ok(goal)
}

/// Resolve the goal for a planning request: optional file, then overrides.
pub fn resolve_goal(path: Option<&Path>, overrides: &GoalOverrides) -> Result<GoalCondition> {
    let base = match path {
        Some(path) => load_goal(path)?,
        None => GoalCondition::default(),
    };
    Ok(overrides.apply(base))
}
