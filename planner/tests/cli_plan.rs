//! CLI tests for `planner plan`, `planner validate` and `planner init`.
//!
//! Spawns the planner binary in a scratch workspace and verifies exit codes
//! and stdout for each planning outcome.

use std::fs;
use std::process::{Command, Output};

use planner::core::types::{FailureReason, Plan, PlanResult, PlanStep};
use planner::exit_codes;
use planner::io::config::{OutputFormat, PlannerConfig};
use planner::test_support::{Workspace, chain_document, document};

fn planner(workspace: &Workspace, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_planner"))
        .current_dir(workspace.path())
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run planner")
}

fn parse_result(output: &Output) -> PlanResult {
    serde_json::from_slice(&output.stdout).expect("plan result json")
}

#[test]
fn plan_found_exits_ok_with_json_steps() {
    let workspace = Workspace::new().expect("workspace");
    workspace.write_graph(&chain_document()).expect("graph");

    let output = planner(&workspace, &["plan", "--from", "S", "--target", "Goal"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        parse_result(&output),
        PlanResult::Plan(Plan::new(vec![
            PlanStep::new("t1", "S", "A", 0),
            PlanStep::new("t2", "A", "Goal", 1),
        ]))
    );
}

#[test]
fn satisfied_goal_exits_with_satisfied_code() {
    let workspace = Workspace::new().expect("workspace");
    workspace.write_graph(&chain_document()).expect("graph");

    let output = planner(&workspace, &["plan", "--from", "Goal", "--target", "Goal"]);

    assert_eq!(output.status.code(), Some(exit_codes::SATISFIED));
    assert_eq!(
        parse_result(&output),
        PlanResult::GoalAlreadySatisfied {
            current_state_id: "Goal".to_string()
        }
    );
}

#[test]
fn depth_limit_exits_with_no_plan_code() {
    let workspace = Workspace::new().expect("workspace");
    workspace.write_graph(&chain_document()).expect("graph");

    let output = planner(
        &workspace,
        &["plan", "--from", "S", "--target", "Goal", "--max-depth", "1"],
    );

    assert_eq!(output.status.code(), Some(exit_codes::NO_PLAN));
    assert_eq!(
        parse_result(&output).failure_reason(),
        Some(&FailureReason::MaxDepthExceeded { max_depth: 1 })
    );
}

#[test]
fn config_format_selects_text_output() {
    let workspace = Workspace::new().expect("workspace");
    workspace
        .write_graph(&document(&["S", "Goal"], &[]))
        .expect("graph");
    workspace
        .write_config(&PlannerConfig {
            max_depth: 5,
            format: OutputFormat::Text,
        })
        .expect("config");

    let output = planner(&workspace, &["plan", "--from", "S", "--target", "Goal"]);

    assert_eq!(output.status.code(), Some(exit_codes::NO_PLAN));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(
        stdout.trim_end(),
        "no plan found from S: no transition path reaches goal 'Goal'"
    );
}

#[test]
fn goal_file_is_combined_with_flags() {
    let workspace = Workspace::new().expect("workspace");
    workspace.write_graph(&chain_document()).expect("graph");
    fs::write(
        workspace.path().join("goal.toml"),
        "target_node_id = \"Goal\"\n",
    )
    .expect("goal file");

    let output = planner(
        &workspace,
        &[
            "plan",
            "--from",
            "S",
            "--goal",
            "goal.toml",
            "--output-type",
            "Release",
        ],
    );

    assert_eq!(output.status.code(), Some(exit_codes::NO_PLAN));
    assert_eq!(
        parse_result(&output).failure_reason(),
        Some(&FailureReason::RequiredTransitionNotInGraph {
            goal_node_id: Some("Goal".to_string())
        })
    );
}

#[test]
fn unknown_current_state_is_invalid() {
    let workspace = Workspace::new().expect("workspace");
    workspace.write_graph(&chain_document()).expect("graph");

    let output = planner(&workspace, &["plan", "--from", "nowhere", "--target", "Goal"]);

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("unknown current state 'nowhere'"));
}

#[test]
fn zero_max_depth_is_invalid() {
    let workspace = Workspace::new().expect("workspace");
    workspace.write_graph(&chain_document()).expect("graph");

    let output = planner(
        &workspace,
        &["plan", "--from", "S", "--target", "Goal", "--max-depth", "0"],
    );

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("max_depth must be >= 1"));
}

#[test]
fn validate_reports_counts_and_dangling_warnings() {
    let workspace = Workspace::new().expect("workspace");
    workspace
        .write_graph(&document(&["S", "Goal"], &[("t1", "ghost", "Goal")]))
        .expect("graph");

    let output = planner(&workspace, &["validate"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert_eq!(stdout.trim_end(), "ok: 2 states, 1 transitions");
    assert!(stderr.contains("warning: t1: source 'ghost' is not a known state"));
}

#[test]
fn validate_rejects_duplicate_ids() {
    let workspace = Workspace::new().expect("workspace");
    fs::write(
        workspace.path().join("graph.json"),
        r#"{"version": 1, "states": [{"node_id": "S"}, {"node_id": "S"}]}"#,
    )
    .expect("graph");

    let output = planner(&workspace, &["validate"]);

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("duplicate state id 'S'"));
}

#[test]
fn init_then_plan_uses_starter_graph() {
    let workspace = Workspace::new().expect("workspace");

    let init = planner(&workspace, &["init"]);
    assert_eq!(init.status.code(), Some(exit_codes::OK));
    assert!(workspace.path().join("planner.toml").exists());

    let output = planner(
        &workspace,
        &["plan", "--from", "S", "--capability", "publish"],
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        parse_result(&output).plan().map(Plan::transition_ids),
        Some(vec!["t1", "t2"])
    );
}
