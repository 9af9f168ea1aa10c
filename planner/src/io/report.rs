//! Rendering of planning results for the CLI.

use anyhow::{Context, Result};
use minijinja::{Environment, context};

use crate::core::types::PlanResult;
use crate::io::config::OutputFormat;

const PLAN_REPORT_TEMPLATE: &str = include_str!("templates/plan_report.txt");

/// Render `result` in the requested format, terminated by a newline.
pub fn render(
    result: &PlanResult,
    current_state_id: &str,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(result),
        OutputFormat::Text => render_text(result, current_state_id),
    }
}

pub fn render_json(result: &PlanResult) -> Result<String> {
    let mut payload = serde_json::to_string_pretty(result).context("serialize plan result")?;
    payload.push('\n');
    Ok(payload)
}

pub fn render_text(result: &PlanResult, current_state_id: &str) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("plan_report", PLAN_REPORT_TEMPLATE)
        .context("load plan report template")?;
    let template = env.get_template("plan_report")?;

    let mut rendered = match result {
        PlanResult::Plan(plan) => template.render(context! {
            outcome => "plan",
            current_state_id => current_state_id,
            final_state_id => plan.final_state_id().unwrap_or(current_state_id),
            steps => plan.steps(),
        }),
        PlanResult::GoalAlreadySatisfied { current_state_id } => template.render(context! {
            outcome => "goal_already_satisfied",
            current_state_id => current_state_id,
        }),
        PlanResult::NoPlanFound { reason } => template.render(context! {
            outcome => "no_plan_found",
            current_state_id => current_state_id,
            reason => reason.to_string(),
        }),
    }
    .context("render plan report")?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}
