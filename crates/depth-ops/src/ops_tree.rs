//! Operation: resolve dependency trees and print them.

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use depth_core::config::ImporterConfig;
use depth_core::index::ModuleIndex;
use depth_resolver::importer::{GoListImporter, Importer, IndexImporter};
use depth_resolver::{render, Pkg, Tree};
use depth_util::errors::{DepthError, DepthResult};
use depth_util::progress;

/// How each resolved tree is written out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Box-drawn tree followed by a summary line.
    #[default]
    Tree,
    /// Pretty-printed JSON of the whole tree.
    Json,
    /// Every path from the root to the named module.
    Explain(String),
    /// Graphviz DOT source.
    Graph,
}

/// Pick the module resolver described by `[importer]`.
///
/// A configured index file takes precedence over the Go toolchain.
pub fn build_importer(config: &ImporterConfig) -> DepthResult<Arc<dyn Importer>> {
    match &config.index {
        Some(path) => {
            let index = ModuleIndex::from_path(path)?;
            if index.is_empty() {
                tracing::warn!("Module index {} lists no modules", path.display());
            }
            tracing::debug!(
                "Resolving modules from index {} ({} modules)",
                path.display(),
                index.len()
            );
            Ok(Arc::new(IndexImporter::new(index)))
        }
        None => {
            tracing::debug!("Resolving modules with `{} list`", config.go);
            Ok(Arc::new(GoListImporter::new(config.go.clone())))
        }
    }
}

/// Resolve every root in turn and write each tree to `out`.
///
/// A root that cannot be resolved is reported as `'<root>': FATAL: <reason>`
/// and the remaining roots are still processed; the call fails afterwards.
pub async fn tree<W: Write>(
    out: &mut W,
    tree: &mut Tree,
    roots: &[String],
    mode: &OutputMode,
) -> DepthResult<()> {
    let mut failed = Vec::new();

    for root in roots {
        let start = Instant::now();
        let pb = progress::spinner(&format!("Resolving {root}"));
        let result = tree.resolve(root).await;
        pb.finish_and_clear();

        if let Err(e) = result {
            progress::status_warn("Failed", root);
            writeln!(out, "'{root}': FATAL: {e}").map_err(DepthError::Io)?;
            failed.push(root.as_str());
            continue;
        }
        progress::status(
            "Resolved",
            &format!("{root} in {:.2}s", start.elapsed().as_secs_f64()),
        );
        if let Some(pkg) = tree.root() {
            write_tree(out, pkg, mode)?;
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(DepthError::Generic {
            message: format!("unable to resolve {}", failed.join(", ")),
        }
        .into())
    }
}

fn write_tree<W: Write>(out: &mut W, root: &Pkg, mode: &OutputMode) -> DepthResult<()> {
    let text = match mode {
        OutputMode::Tree => format!("{}{}\n", render::print_tree(root), render::summarize(root)),
        OutputMode::Json => {
            let json = render::to_json(root).map_err(|e| DepthError::Generic {
                message: format!("Failed to serialize {}: {e}", root.name),
            })?;
            format!("{json}\n")
        }
        OutputMode::Explain(target) => render::explain_paths(root, target)
            .iter()
            .map(|path| format!("{path}\n"))
            .collect(),
        OutputMode::Graph => render::to_dot(root),
    };
    out.write_all(text.as_bytes()).map_err(DepthError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depth_core::index::ModuleIndex;
    use depth_core::module::ModuleInfo;
    use depth_resolver::TreeOptions;

    fn index() -> ModuleIndex {
        ModuleIndex::new()
            .with(
                ModuleInfo::new("example.com/app")
                    .imports(["fmt", "example.com/lib"])
                    .test_imports(["testing"]),
            )
            .with(ModuleInfo::new("example.com/lib").imports(["fmt", "example.com/gone"]))
            .with(ModuleInfo::new("fmt").internal().imports(["io"]))
            .with(ModuleInfo::new("io").internal())
            .with(ModuleInfo::new("testing").internal())
    }

    fn tree_with(options: TreeOptions) -> Tree {
        Tree::with_options(Arc::new(IndexImporter::new(index())), options)
    }

    async fn run(roots: &[&str], mode: OutputMode) -> (String, DepthResult<()>) {
        let mut tr = tree_with(TreeOptions::default());
        let roots: Vec<String> = roots.iter().map(|r| r.to_string()).collect();
        let mut out = Vec::new();
        let result = tree(&mut out, &mut tr, &roots, &mode).await;
        (String::from_utf8(out).unwrap(), result)
    }

    #[tokio::test]
    async fn tree_output_ends_with_summary() {
        let (out, result) = run(&["example.com/app"], OutputMode::Tree).await;
        assert!(result.is_ok());
        assert_eq!(
            out,
            "\
example.com/app
  ├ fmt
  └ example.com/lib
    ├ fmt
    └ example.com/gone (unresolved)
3 dependencies (1 internal, 2 external, 0 testing).
"
        );
    }

    #[tokio::test]
    async fn json_output_is_valid() {
        let (out, result) = run(&["example.com/app"], OutputMode::Json).await;
        assert!(result.is_ok());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["name"], "example.com/app");
        assert_eq!(value["deps"][1]["deps"][1]["resolved"], false);
    }

    #[tokio::test]
    async fn explain_prints_one_line_per_path() {
        let (out, _) = run(&["example.com/app"], OutputMode::Explain("fmt".into())).await;
        assert_eq!(
            out,
            "example.com/app -> fmt\nexample.com/app -> example.com/lib -> fmt\n"
        );
    }

    #[tokio::test]
    async fn graph_output_is_dot() {
        let (out, _) = run(&["example.com/app"], OutputMode::Graph).await;
        assert!(out.starts_with("digraph {"));
        assert!(out.contains("\"example.com/gone\""));
    }

    #[tokio::test]
    async fn failed_root_does_not_stop_the_others() {
        let (out, result) = run(&["nope", "fmt"], OutputMode::Tree).await;
        assert!(out.starts_with("'nope': FATAL: unable to resolve root package\n"));
        assert!(out.contains("fmt\n  └ io\n"));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn index_config_selects_index_importer() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("modules.toml");
        std::fs::write(&path, index().to_string_pretty().unwrap()).unwrap();

        let config = ImporterConfig {
            index: Some(path),
            ..ImporterConfig::default()
        };
        let importer = build_importer(&config).unwrap();
        let info = importer
            .import("fmt", "", depth_core::module::ImportMode::Full)
            .unwrap();
        assert!(info.internal);
    }

    #[test]
    fn empty_index_finds_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("modules.toml");
        std::fs::write(&path, "").unwrap();

        let config = ImporterConfig {
            index: Some(path),
            ..ImporterConfig::default()
        };
        let importer = build_importer(&config).unwrap();
        assert!(importer
            .import("fmt", "", depth_core::module::ImportMode::Full)
            .is_err());
    }

    #[test]
    fn missing_index_file_is_an_error() {
        let config = ImporterConfig {
            index: Some("/nonexistent/modules.toml".into()),
            ..ImporterConfig::default()
        };
        assert!(build_importer(&config).is_err());
    }
}
