//! I/O helpers for planner commands.

pub mod config;
pub mod format;
pub mod goal_store;
pub mod graph_store;
pub mod init;
pub mod report;
