//! Read-only views of a resolved tree: text tree, summary, JSON, explain
//! paths, and parent→child edges (optionally as a Graphviz DOT graph).

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::pkg::Pkg;

const CLOSED_PADDING: &str = "  ";
const OPEN_PADDING: &str = "│ ";
const PREFIX: &str = "├ ";
const PREFIX_LAST: &str = "└ ";

/// Print the tree, one module per line, with box-drawing guides.
pub fn print_tree(root: &Pkg) -> String {
    let mut output = format!("{root}\n");
    let count = root.deps.len();
    let mut closed = vec![true];
    for (i, dep) in root.deps.iter().enumerate() {
        print_subtree(&mut output, dep, &mut closed, i == count - 1);
    }
    output
}

/// `closed[i]` records whether the guide column of ancestor level `i` has ended.
fn print_subtree(output: &mut String, pkg: &Pkg, closed: &mut Vec<bool>, is_last: bool) {
    for &c in closed.iter() {
        output.push_str(if c { CLOSED_PADDING } else { OPEN_PADDING });
    }
    output.push_str(if is_last { PREFIX_LAST } else { PREFIX });
    output.push_str(&format!("{pkg}\n"));

    closed.push(is_last);
    let count = pkg.deps.len();
    for (i, dep) in pkg.deps.iter().enumerate() {
        print_subtree(output, dep, closed, i == count - 1);
    }
    closed.pop();
}

/// Counts of the distinct modules below a root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub internal: usize,
    pub external: usize,
    pub testing: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.internal + self.external
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} dependencies ({} internal, {} external, {} testing).",
            self.total(),
            self.internal,
            self.external,
            self.testing
        )
    }
}

/// Summarize the distinct module names below `root`.
///
/// A name's first occurrence in depth-first order decides its classification.
pub fn summarize(root: &Pkg) -> Summary {
    let mut summary = Summary::default();
    let mut names = HashSet::new();
    for dep in &root.deps {
        collect_summary(&mut summary, dep, &mut names);
    }
    summary
}

fn collect_summary<'a>(summary: &mut Summary, pkg: &'a Pkg, names: &mut HashSet<&'a str>) {
    if !names.insert(pkg.name.as_str()) {
        return;
    }
    if pkg.internal {
        summary.internal += 1;
    } else {
        summary.external += 1;
    }
    if pkg.test {
        summary.testing += 1;
    }
    for dep in &pkg.deps {
        collect_summary(summary, dep, names);
    }
}

/// Pretty-printed JSON of the whole tree.
pub fn to_json(root: &Pkg) -> serde_json::Result<String> {
    serde_json::to_string_pretty(root)
}

/// Every path from the root to a module named `target`, as `a -> b -> target`.
pub fn explain_paths(root: &Pkg, target: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut stack = Vec::new();
    collect_paths(root, target, &mut stack, &mut paths);
    paths
}

fn collect_paths<'a>(
    pkg: &'a Pkg,
    target: &str,
    stack: &mut Vec<&'a str>,
    paths: &mut Vec<String>,
) {
    stack.push(&pkg.name);
    if pkg.name == target {
        paths.push(stack.join(" -> "));
    }
    for dep in &pkg.deps {
        collect_paths(dep, target, stack, paths);
    }
    stack.pop();
}

/// All parent→child name pairs, depth-first.
pub fn edges(root: &Pkg) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    collect_edges(root, &mut out);
    out
}

fn collect_edges<'a>(pkg: &'a Pkg, out: &mut Vec<(&'a str, &'a str)>) {
    for dep in &pkg.deps {
        out.push((pkg.name.as_str(), dep.name.as_str()));
        collect_edges(dep, out);
    }
}

/// Graphviz DOT source with one vertex per distinct module name.
pub fn to_dot(root: &Pkg) -> String {
    let mut graph: DiGraph<&str, &str> = DiGraph::new();
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();

    vertex(&mut graph, &mut index, &root.name);
    for (parent, child) in edges(root) {
        let from = vertex(&mut graph, &mut index, parent);
        let to = vertex(&mut graph, &mut index, child);
        graph.update_edge(from, to, "");
    }

    format!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
}

fn vertex<'a>(
    graph: &mut DiGraph<&'a str, &'a str>,
    index: &mut HashMap<&'a str, NodeIndex>,
    name: &'a str,
) -> NodeIndex {
    *index.entry(name).or_insert_with(|| graph.add_node(name))
}
