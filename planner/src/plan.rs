//! Orchestration for `planner plan`.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use crate::core::goal::GoalCondition;
use crate::core::graph::ContractGraph;
use crate::core::planner::BackwardChainingPlanner;
use crate::core::types::PlanResult;
use crate::io::config::{OutputFormat, load_config};
use crate::io::goal_store::{GoalOverrides, resolve_goal};
use crate::io::graph_store::load_graph;
use crate::io::report::render;

/// Inputs for a planning run read from disk.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub graph_path: PathBuf,
    pub goal_path: Option<PathBuf>,
    pub goal_overrides: GoalOverrides,
    pub current_state_id: String,
    /// Wins over the config file's `max_depth`.
    pub max_depth: Option<usize>,
    /// Wins over the config file's `format`.
    pub format: Option<OutputFormat>,
    pub config_path: PathBuf,
}

/// Planning result plus its rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanReport {
    pub result: PlanResult,
    pub rendered: String,
}

/// Plan from a state of an in-memory graph.
///
/// Errors only if `current_state_id` is not a state of `graph`; every
/// planning failure is a `PlanResult::NoPlanFound` value.
pub fn plan_in_graph(
    planner: &BackwardChainingPlanner,
    graph: &ContractGraph,
    goal: &GoalCondition,
    current_state_id: &str,
) -> Result<PlanResult> {
    let current = graph
        .state(current_state_id)
        .ok_or_else(|| anyhow!("unknown current state '{current_state_id}'"))?;
    Ok(planner.plan(graph, goal, current))
}

/// Load config, graph and goal from disk, plan, and render the result.
pub fn run_plan(request: &PlanRequest) -> Result<PlanReport> {
    let config = load_config(&request.config_path)?;
    let planner = config.planner(request.max_depth)?;
    let loaded = load_graph(&request.graph_path)?;
    let goal = resolve_goal(request.goal_path.as_deref(), &request.goal_overrides)
        .context("resolve goal")?;

    let result = plan_in_graph(&planner, &loaded.graph, &goal, &request.current_state_id)?;
    info!(
        current_state_id = %request.current_state_id,
        max_depth = planner.max_depth(),
        plan = result.is_plan(),
        "planning finished"
    );

    let format = request.format.unwrap_or(config.format);
    let rendered = render(&result, &request.current_state_id, format)?;
    Ok(PlanReport { result, rendered })
}
