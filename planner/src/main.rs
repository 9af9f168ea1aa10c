//! Contract graph planner CLI.
//!
//! Loads a contract graph document (`graph.json` / `graph.toml`) and finds the
//! fewest-transition plan from a current state to a state satisfying a goal.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use planner::exit_codes;
use planner::io::config::{DEFAULT_CONFIG_FILE, OutputFormat};
use planner::io::goal_store::GoalOverrides;
use planner::io::init::{DEFAULT_GRAPH_FILE, InitOptions, init_planner};
use planner::logging;
use planner::plan::{PlanRequest, run_plan};
use planner::validate::validate_graph_file;

#[derive(Parser)]
#[command(
    name = "planner",
    version,
    about = "Goal-conditioned backward-chaining planner over contract graphs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default `planner.toml` and starter `graph.json` if missing.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Check a graph document against schema and invariants (unique ids, etc.).
    Validate {
        #[arg(long, default_value = DEFAULT_GRAPH_FILE)]
        graph: PathBuf,
    },
    /// Find the shortest transition plan from a state to the goal.
    Plan(PlanArgs),
}

#[derive(Args)]
struct PlanArgs {
    /// Graph document (`.json` or `.toml`).
    #[arg(long, default_value = DEFAULT_GRAPH_FILE)]
    graph: PathBuf,
    /// Id of the current state.
    #[arg(long = "from")]
    from: String,
    /// Goal condition document (`.json` or `.toml`).
    #[arg(long)]
    goal: Option<PathBuf>,
    /// Exact goal state id.
    #[arg(long)]
    target: Option<String>,
    /// Capability the goal state must have (repeatable).
    #[arg(long = "capability")]
    capabilities: Vec<String>,
    /// Highest acceptable policy tier (inclusive).
    #[arg(long)]
    policy_tier_max: Option<u32>,
    /// Metadata key the goal state must carry (repeatable).
    #[arg(long = "metadata-key")]
    metadata_keys: Vec<String>,
    /// Output type the entering transition must produce (repeatable).
    #[arg(long = "output-type")]
    output_types: Vec<String>,
    /// Longest plan to accept, overriding the config file.
    #[arg(long)]
    max_depth: Option<usize>,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

impl PlanArgs {
    fn into_request(self) -> PlanRequest {
        PlanRequest {
            graph_path: self.graph,
            goal_path: self.goal,
            goal_overrides: GoalOverrides {
                target_node_id: self.target,
                capabilities: self.capabilities,
                policy_tier_max: self.policy_tier_max,
                metadata_keys: self.metadata_keys,
                output_types: self.output_types,
            },
            current_state_id: self.from,
            max_depth: self.max_depth,
            format: self.format,
            config_path: self.config,
        }
    }
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(force),
        Command::Validate { graph } => cmd_validate(graph),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn cmd_init(force: bool) -> Result<i32> {
    let root = std::env::current_dir()?;
    for path in init_planner(&root, &InitOptions { force })? {
        println!("wrote {}", path.display());
    }
    Ok(exit_codes::OK)
}

fn cmd_validate(graph: PathBuf) -> Result<i32> {
    let summary = validate_graph_file(&graph)?;
    for warning in &summary.warnings {
        eprintln!("warning: {warning}");
    }
    println!(
        "ok: {} states, {} transitions",
        summary.states, summary.transitions
    );
    Ok(exit_codes::OK)
}

fn cmd_plan(args: PlanArgs) -> Result<i32> {
    let report = run_plan(&args.into_request())?;
    print!("{}", report.rendered);
    Ok(exit_codes::for_result(&report.result))
}
