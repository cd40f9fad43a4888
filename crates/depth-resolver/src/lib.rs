//! Dependency tree engine: resolves the transitive import graph of a root
//! module by recursively querying an [`importer::Importer`], fanning sibling
//! lookups out concurrently, and producing a deterministic, classified tree.

pub mod importer;
pub mod pkg;
pub mod policy;
pub mod render;
pub mod seen;
pub mod tree;

pub use pkg::{Pkg, ResolveStatus};
pub use tree::{Tree, TreeContext, TreeOptions};
