//! A module in the resolved tree, and the per-node resolution algorithm.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use serde::{Serialize, Serializer};
use tokio::task::JoinSet;

use depth_core::module::ImportMode;

use crate::tree::TreeContext;

/// Foreign-linkage pseudo-module; there is nothing to resolve behind it.
const FOREIGN_PSEUDO_MODULE: &str = "C";

/// Modules from this namespace are only reachable through the vendor tree.
const VENDORED_NAMESPACE: &str = "golang_org";

/// Outcome of a node's resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveStatus {
    /// Not attempted yet.
    #[default]
    Pending,
    /// The lookup succeeded.
    Resolved,
    /// The lookup failed; the node is a leaf.
    Unresolved,
}

/// One module in the dependency tree, owning its direct dependencies.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Pkg {
    /// Canonical module name once resolved; the requested name before that.
    pub name: String,
    /// Directory that relative imports of this module are resolved against.
    #[serde(skip)]
    pub src_dir: String,
    /// Whether the module belongs to the platform distribution.
    pub internal: bool,
    #[serde(rename = "resolved", serialize_with = "serialize_success")]
    pub status: ResolveStatus,
    /// Whether the parent only imports this module from its tests.
    pub test: bool,
    /// Canonical name of the parent; `None` only for the root.
    #[serde(skip)]
    pub parent: Option<String>,
    /// Number of parent links up to the root.
    #[serde(skip)]
    pub depth: usize,
    pub deps: Vec<Pkg>,
}

fn serialize_success<S: Serializer>(status: &ResolveStatus, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_bool(*status == ResolveStatus::Resolved)
}

impl Pkg {
    /// A root node: no parent, depth zero.
    pub fn root(name: impl Into<String>, src_dir: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            src_dir: src_dir.into(),
            ..Self::default()
        }
    }

    /// An unresolved child of `parent`.
    pub fn child_of(
        parent: &Pkg,
        name: impl Into<String>,
        src_dir: impl Into<String>,
        test: bool,
    ) -> Self {
        Self {
            name: name.into(),
            src_dir: src_dir.into(),
            test,
            parent: Some(parent.name.clone()),
            depth: parent.depth + 1,
            ..Self::default()
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// `true` once a resolution attempt has completed, successful or not.
    pub fn is_resolved(&self) -> bool {
        self.status != ResolveStatus::Pending
    }

    /// `true` if the lookup for this module succeeded.
    pub fn is_success(&self) -> bool {
        self.status == ResolveStatus::Resolved
    }

    /// The name to hand to the importer, or `None` if the module cannot be looked up.
    pub fn clean_name(&self) -> Option<String> {
        if self.name == FOREIGN_PSEUDO_MODULE {
            return None;
        }
        if self.name.starts_with(VENDORED_NAMESPACE) {
            return Some(format!("vendor/{}", self.name));
        }
        Some(self.name.clone())
    }

    /// Resolve this module and, recursively and concurrently, its dependencies.
    ///
    /// Lookup failures are recorded on the node itself and never propagate.
    pub async fn resolve(&mut self, ctx: &Arc<TreeContext>) {
        let Some(name) = self.clean_name() else {
            self.status = ResolveStatus::Resolved;
            return;
        };

        // The seen-set is consulted first so the name is marked even at max depth.
        let seen = ctx.has_seen_import(&name);
        let mode = if seen || ctx.is_at_max_depth(self) {
            ImportMode::FindOnly
        } else {
            ImportMode::Full
        };

        let info = match ctx.import(&name, &self.src_dir, mode).await {
            Ok(info) => info,
            Err(e) => {
                tracing::debug!("{e}");
                self.status = ResolveStatus::Unresolved;
                return;
            }
        };
        self.status = ResolveStatus::Resolved;

        if !info.path.is_empty() {
            self.name = info.path.clone();
        }
        self.internal = info.internal;

        if self.internal && !ctx.should_resolve_internal(self) {
            return;
        }

        let with_tests = ctx.options().resolve_test;
        let imports = unique_imports(&self.name, info.candidate_imports(with_tests));
        self.set_deps(ctx, imports, &info.dir).await;
    }

    /// Resolve every import as a child concurrently, then order the children.
    async fn set_deps(
        &mut self,
        ctx: &Arc<TreeContext>,
        imports: Vec<(String, bool)>,
        src_dir: &str,
    ) {
        let pending: Vec<Pkg> = imports
            .into_iter()
            .map(|(name, test)| Pkg::child_of(self, name, src_dir, test))
            .collect();

        let mut join_set = JoinSet::new();
        for (slot, dep) in pending.iter().enumerate() {
            let task = resolve_pkg(Arc::clone(ctx), dep.clone()).map(move |dep| (slot, dep));
            join_set.spawn(task);
        }

        let mut finished: Vec<Option<Pkg>> = vec![None; pending.len()];
        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((slot, dep)) => finished[slot] = Some(dep),
                Err(e) => tracing::warn!("Resolving a dependency of {} failed: {e}", self.name),
            }
        }

        // A task that died still leaves its child behind, as an unresolved leaf.
        self.deps = pending
            .into_iter()
            .zip(finished)
            .map(|(placeholder, dep)| {
                dep.unwrap_or(Pkg {
                    status: ResolveStatus::Unresolved,
                    ..placeholder
                })
            })
            .collect();
        self.deps.sort_by(by_internal_and_name);
    }
}

/// Resolve `pkg` as an independent task and hand it back.
pub(crate) fn resolve_pkg(ctx: Arc<TreeContext>, mut pkg: Pkg) -> BoxFuture<'static, Pkg> {
    async move {
        pkg.resolve(&ctx).await;
        pkg
    }
    .boxed()
}

/// Drop self-imports and repeated names, keeping the first occurrence.
fn unique_imports(own_name: &str, candidates: Vec<(&str, bool)>) -> Vec<(String, bool)> {
    let mut unique = HashSet::new();
    candidates
        .into_iter()
        .filter(|(name, _)| *name != own_name && unique.insert(*name))
        .map(|(name, test)| (name.to_string(), test))
        .collect()
}

/// Internal modules first, then lexicographic by name.
pub fn by_internal_and_name(a: &Pkg, b: &Pkg) -> Ordering {
    b.internal.cmp(&a.internal).then_with(|| a.name.cmp(&b.name))
}

impl fmt::Display for Pkg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.status == ResolveStatus::Unresolved {
            write!(f, " (unresolved)")?;
        }
        Ok(())
    }
}
