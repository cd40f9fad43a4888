//! Handler for `depth <PKG>...`.

use miette::Result;

use depth_core::config::GlobalConfig;
use depth_ops::ops_tree::{self, OutputMode};
use depth_resolver::{Tree, TreeOptions};

use crate::cli::Cli;

pub async fn exec(cli: Cli) -> Result<()> {
    let config = match GlobalConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to load global config, using defaults: {e}");
            GlobalConfig::default()
        }
    };

    let options = TreeOptions {
        resolve_internal: cli.internal || config.resolve.internal,
        resolve_test: cli.test || config.resolve.test,
        max_depth: cli.max.unwrap_or(config.resolve.max_depth),
        jobs: cli.jobs.unwrap_or(config.resolve.jobs),
    };

    let mut importer_config = config.importer;
    if let Some(index) = cli.index {
        importer_config.index = Some(index);
    }
    if let Some(go) = cli.go {
        importer_config.go = go;
    }
    let importer = ops_tree::build_importer(&importer_config)?;

    let mode = if cli.json {
        OutputMode::Json
    } else if let Some(target) = cli.explain {
        OutputMode::Explain(target)
    } else if cli.graph {
        OutputMode::Graph
    } else {
        OutputMode::Tree
    };

    let mut tree = Tree::with_options(importer, options);
    ops_tree::tree(&mut std::io::stdout(), &mut tree, &cli.packages, &mode).await
}
