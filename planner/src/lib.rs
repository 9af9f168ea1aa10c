//! Goal-conditioned backward-chaining planner over contract graphs.
//!
//! Given a graph of declared states and the transitions between them, the
//! planner finds the fewest-transition path from a current state to any state
//! satisfying a goal condition. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (graph, goal predicate, backward
//!   search, planner). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, graph and goal documents,
//!   report rendering).
//!
//! Orchestration modules ([`plan`], [`validate`]) coordinate core logic with
//! I/O to implement CLI commands.

pub mod core;
pub mod document;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod plan;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validate;
