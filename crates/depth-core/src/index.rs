use serde::{Deserialize, Serialize};
use std::path::Path;

use depth_util::errors::DepthError;

use crate::module::ModuleInfo;

/// A static module index: every module a lookup may find, with its imports.
///
/// Serialized as a TOML document of `[[module]]` tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleIndex {
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleInfo>,
}

impl ModuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a module, builder style.
    pub fn with(mut self, module: ModuleInfo) -> Self {
        self.modules.push(module);
        self
    }

    /// Load and parse an index file from the given path.
    pub fn from_path(path: &Path) -> Result<Self, DepthError> {
        let content = std::fs::read_to_string(path).map_err(|e| DepthError::Index {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self, DepthError> {
        let index: Self = toml::from_str(content).map_err(|e| DepthError::Index {
            message: format!("Failed to parse module index: {e}"),
        })?;
        if let Some(pos) = index.modules.iter().position(|m| m.path.is_empty()) {
            return Err(DepthError::Index {
                message: format!("module #{} has an empty `path`", pos + 1),
            });
        }
        Ok(index)
    }

    /// Look up a module by exact path. Later entries shadow earlier ones.
    pub fn get(&self, path: &str) -> Option<&ModuleInfo> {
        self.modules.iter().rev().find(|m| m.path == path)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Serialize the index to a pretty-printed TOML string.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
