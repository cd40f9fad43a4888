//! CLI argument definitions for depth.
//!
//! Uses `clap` derive macros. Flags given here override the matching keys of
//! `~/.depth/config.toml`.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "depth",
    version,
    about = "Visualize the dependency tree of Go packages",
    long_about = "depth resolves the import graph of one or more Go packages and prints it \
                  as a tree, JSON, a list of import paths, or a Graphviz graph."
)]
pub struct Cli {
    /// Packages to resolve
    #[arg(required = true, value_name = "PKG")]
    pub packages: Vec<String>,

    /// Resolve dependencies of internal (standard library) packages
    #[arg(long)]
    pub internal: bool,

    /// Resolve dependencies used for testing
    #[arg(long)]
    pub test: bool,

    /// Maximum depth of dependencies to resolve (0 for unbounded)
    #[arg(long, value_name = "N")]
    pub max: Option<usize>,

    /// Maximum number of package lookups running at once
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Output the dependency tree as JSON
    #[arg(long, conflicts_with_all = ["explain", "graph"])]
    pub json: bool,

    /// Show every import path that leads to the given package
    #[arg(long, value_name = "PKG", conflicts_with = "graph")]
    pub explain: Option<String>,

    /// Output the dependency graph as Graphviz DOT source (pipe it to `dot -Tpng` to render an image)
    #[arg(long)]
    pub graph: bool,

    /// Resolve packages from a module index file instead of `go list`
    #[arg(long, env = "DEPTH_INDEX", value_name = "FILE")]
    pub index: Option<PathBuf>,

    /// Go toolchain binary used for `go list`
    #[arg(long, value_name = "BIN")]
    pub go: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_modes_are_exclusive() {
        assert!(Cli::try_parse_from(["depth", "--json", "--graph", "strings"]).is_err());
        assert!(Cli::try_parse_from(["depth", "--json", "--explain", "io", "strings"]).is_err());
        assert!(Cli::try_parse_from(["depth", "--explain", "io", "--graph", "strings"]).is_err());
    }

    #[test]
    fn packages_are_required() {
        assert!(Cli::try_parse_from(["depth", "--internal"]).is_err());
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "depth", "--internal", "--test", "--max", "3", "-j", "2", "--explain", "io",
            "--go", "/opt/go/bin/go", "strings", "net/http",
        ])
        .unwrap();
        assert!(cli.internal && cli.test);
        assert_eq!(cli.max, Some(3));
        assert_eq!(cli.jobs, Some(2));
        assert_eq!(cli.explain.as_deref(), Some("io"));
        assert_eq!(cli.go.as_deref(), Some("/opt/go/bin/go"));
        assert_eq!(cli.packages, vec!["strings", "net/http"]);
    }
}
