//! Tree context: shared options, the seen-set, and the `resolve` entry point.

use std::sync::Arc;

use tokio::sync::Semaphore;

use depth_core::module::{ImportMode, ModuleInfo};
use depth_util::errors::DepthError;

use crate::importer::Importer;
use crate::pkg::{resolve_pkg, Pkg};
use crate::policy::{self, Expansion};
use crate::seen::SeenSet;

/// Resolution policy for a [`Tree`].
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Expand dependencies of platform-internal modules.
    pub resolve_internal: bool,
    /// Include test and external-test imports.
    pub resolve_test: bool,
    /// Maximum depth to expand; `0` means unbounded.
    pub max_depth: usize,
    /// Maximum number of importer lookups in flight.
    pub jobs: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            resolve_internal: false,
            resolve_test: false,
            max_depth: 0,
            jobs: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

/// State shared by every node of one resolution run.
pub struct TreeContext {
    options: TreeOptions,
    importer: Arc<dyn Importer>,
    seen: SeenSet,
    lookups: Semaphore,
}

impl TreeContext {
    pub fn new(options: TreeOptions, importer: Arc<dyn Importer>) -> Self {
        let lookups = Semaphore::new(options.jobs.max(1));
        Self {
            options,
            importer,
            seen: SeenSet::new(),
            lookups,
        }
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Mark `name` as seen; `true` if some node in this run already had.
    pub fn has_seen_import(&self, name: &str) -> bool {
        self.seen.check_and_mark(name)
    }

    pub(crate) fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn is_at_max_depth(&self, pkg: &Pkg) -> bool {
        self.options.max_depth > 0 && pkg.depth >= self.options.max_depth
    }

    /// Whether `pkg` may be expanded should it turn out to be platform-internal.
    pub fn should_resolve_internal(&self, pkg: &Pkg) -> bool {
        policy::expansion(true, self.options.resolve_internal, pkg.is_root()) == Expansion::Expand
    }

    /// Run one importer lookup on the blocking pool, within the lookup budget.
    ///
    /// The permit is held for this lookup only, never while children resolve.
    pub(crate) async fn import(
        &self,
        name: &str,
        src_dir: &str,
        mode: ImportMode,
    ) -> Result<ModuleInfo, DepthError> {
        let _permit = self
            .lookups
            .acquire()
            .await
            .map_err(|e| DepthError::import(name, e.to_string()))?;
        tracing::debug!(name, src_dir, ?mode, "Importing module");

        let importer = Arc::clone(&self.importer);
        let (task_name, task_dir) = (name.to_string(), src_dir.to_string());
        tokio::task::spawn_blocking(move || importer.import(&task_name, &task_dir, mode))
            .await
            .map_err(|e| DepthError::import(name, format!("lookup task failed: {e}")))?
    }
}

/// Resolves dependency trees rooted at a named module.
///
/// The same `Tree` may resolve many roots; each call starts from an empty
/// seen-set, so runs are independent of one another.
pub struct Tree {
    pub options: TreeOptions,
    importer: Arc<dyn Importer>,
    root: Option<Pkg>,
}

impl Tree {
    pub fn new(importer: Arc<dyn Importer>) -> Self {
        Self::with_options(importer, TreeOptions::default())
    }

    pub fn with_options(importer: Arc<dyn Importer>, options: TreeOptions) -> Self {
        Self {
            options,
            importer,
            root: None,
        }
    }

    /// Root of the last run. After a root failure it is present but unresolved.
    pub fn root(&self) -> Option<&Pkg> {
        self.root.as_ref()
    }

    /// Resolve `name` relative to the current working directory.
    pub async fn resolve(&mut self, name: &str) -> Result<(), DepthError> {
        let src_dir = match std::env::current_dir() {
            Ok(dir) => dir.display().to_string(),
            Err(e) => {
                tracing::warn!("Failed to read the working directory: {e}");
                String::new()
            }
        };
        self.resolve_from(name, &src_dir).await
    }

    /// Resolve `name` relative to `src_dir`.
    ///
    /// Fails only when the root itself cannot be located; failures deeper in
    /// the tree are recorded on the affected nodes.
    pub async fn resolve_from(&mut self, name: &str, src_dir: &str) -> Result<(), DepthError> {
        let ctx = Arc::new(TreeContext::new(
            self.options.clone(),
            Arc::clone(&self.importer),
        ));
        let root = resolve_pkg(Arc::clone(&ctx), Pkg::root(name, src_dir)).await;
        let success = root.is_success();
        tracing::debug!(modules = ctx.seen_count(), "Finished resolving {name}");
        self.root = Some(root);

        if success {
            Ok(())
        } else {
            Err(DepthError::RootNotResolved {
                name: name.to_string(),
            })
        }
    }
}
