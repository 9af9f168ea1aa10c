//! Scaffolding for `planner init`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::document::starter_document;
use crate::io::config::{DEFAULT_CONFIG_FILE, PlannerConfig, write_config};
use crate::io::graph_store::write_graph;

/// Default graph document name written by `init`.
pub const DEFAULT_GRAPH_FILE: &str = "graph.json";

/// Canonical planner file locations under a project root.
#[derive(Debug, Clone)]
pub struct PlannerPaths {
    pub config_path: PathBuf,
    pub graph_path: PathBuf,
}

impl PlannerPaths {
    pub fn new(root: &Path) -> Self {
        Self {
            config_path: root.join(DEFAULT_CONFIG_FILE),
            graph_path: root.join(DEFAULT_GRAPH_FILE),
        }
    }
}

/// Options for `init_planner`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing files.
    pub force: bool,
}

/// Write a default `planner.toml` and a starter `graph.json` if missing.
///
/// Returns the paths that were written.
pub fn init_planner(root: &Path, options: &InitOptions) -> Result<Vec<PathBuf>> {
    let paths = PlannerPaths::new(root);
    let mut written = Vec::new();

    if options.force || !paths.config_path.exists() {
        write_config(&paths.config_path, &PlannerConfig::default())?;
        written.push(paths.config_path.clone());
    }
    if options.force || !paths.graph_path.exists() {
        write_graph(&paths.graph_path, &starter_document())?;
        written.push(paths.graph_path.clone());
    }

    debug!(root = %root.display(), written = written.len(), "init complete");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::load_config;
    use crate::io::graph_store::load_graph;
    use std::fs;

    #[test]
    fn init_writes_loadable_files() {
        let temp = tempfile::tempdir().expect("tempdir");
        let written = init_planner(temp.path(), &InitOptions { force: false }).expect("init");
        assert_eq!(written.len(), 2);

        let paths = PlannerPaths::new(temp.path());
        assert_eq!(
            load_config(&paths.config_path).expect("config"),
            PlannerConfig::default()
        );
        assert_eq!(load_graph(&paths.graph_path).expect("graph").document, starter_document());
    }

    #[test]
    fn init_keeps_existing_files_without_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = PlannerPaths::new(temp.path());
        fs::write(&paths.config_path, "max_depth = 4\n").expect("write config");

        let written = init_planner(temp.path(), &InitOptions { force: false }).expect("init");
        assert_eq!(written, vec![paths.graph_path.clone()]);
        assert_eq!(load_config(&paths.config_path).expect("config").max_depth, 4);

        init_planner(temp.path(), &InitOptions { force: true }).expect("force init");
        assert_eq!(load_config(&paths.config_path).expect("config").max_depth, 10);
    }
}
