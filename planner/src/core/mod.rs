//! Deterministic, pure planning logic.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! graphs and return deterministic outputs suitable for tests.

pub mod goal;
pub mod graph;
pub mod invariants;
pub mod path;
pub mod planner;
mod search;
pub mod types;
