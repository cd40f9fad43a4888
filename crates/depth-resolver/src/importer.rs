//! Module resolver capability: maps a module name to its metadata.

use serde::Deserialize;

use depth_core::index::ModuleIndex;
use depth_core::module::{ImportMode, ModuleInfo};
use depth_util::errors::DepthError;
use depth_util::process::CommandBuilder;

/// Looks up a module by name, relative to the directory of the module that imports it.
///
/// Lookups block; the tree runs them on tokio's blocking pool.
pub trait Importer: Send + Sync {
    fn import(
        &self,
        name: &str,
        src_dir: &str,
        mode: ImportMode,
    ) -> Result<ModuleInfo, DepthError>;
}

/// Resolves modules from a static [`ModuleIndex`].
#[derive(Debug, Clone, Default)]
pub struct IndexImporter {
    index: ModuleIndex,
}

impl IndexImporter {
    pub fn new(index: ModuleIndex) -> Self {
        Self { index }
    }
}

impl Importer for IndexImporter {
    fn import(
        &self,
        name: &str,
        _src_dir: &str,
        mode: ImportMode,
    ) -> Result<ModuleInfo, DepthError> {
        let info = self
            .index
            .get(name)
            .cloned()
            .ok_or_else(|| DepthError::import(name, "not found in module index"))?;
        Ok(match mode {
            ImportMode::Full => info,
            ImportMode::FindOnly => info.located_only(),
        })
    }
}

/// Resolves Go packages through `go list -e -json`.
#[derive(Debug, Clone)]
pub struct GoListImporter {
    go: String,
}

impl GoListImporter {
    pub fn new(go: impl Into<String>) -> Self {
        Self { go: go.into() }
    }
}

impl Default for GoListImporter {
    fn default() -> Self {
        Self::new("go")
    }
}

/// Subset of the `go list -json` package record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct GoPackage {
    import_path: String,
    dir: String,
    goroot: bool,
    standard: bool,
    imports: Vec<String>,
    test_imports: Vec<String>,
    x_test_imports: Vec<String>,
    error: Option<GoPackageError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct GoPackageError {
    err: String,
}

impl Importer for GoListImporter {
    fn import(
        &self,
        name: &str,
        src_dir: &str,
        mode: ImportMode,
    ) -> Result<ModuleInfo, DepthError> {
        let find_only = mode == ImportMode::FindOnly;
        let stdout = CommandBuilder::new(&self.go)
            .args(["list", "-e", "-json"])
            .arg_if(find_only, "-find")
            .arg(name)
            .cwd(src_dir)
            .exec_stdout()
            .map_err(|e| DepthError::import(name, e.to_string()))?;

        let pkg: GoPackage = serde_json::from_slice(&stdout)
            .map_err(|e| DepthError::import(name, format!("invalid `go list` output: {e}")))?;
        if let Some(err) = pkg.error {
            return Err(DepthError::import(name, err.err));
        }

        let info = ModuleInfo {
            path: pkg.import_path,
            dir: pkg.dir,
            internal: pkg.goroot || pkg.standard,
            imports: pkg.imports,
            test_imports: pkg.test_imports,
            xtest_imports: pkg.x_test_imports,
        };
        Ok(if find_only { info.located_only() } else { info })
    }
}
