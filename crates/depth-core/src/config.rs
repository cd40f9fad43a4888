use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use depth_util::errors::DepthError;

/// Global user configuration loaded from `~/.depth/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub resolve: ResolveConfig,

    #[serde(default)]
    pub importer: ImporterConfig,
}

/// Resolution defaults from `[resolve]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Expand dependencies of platform-internal modules.
    #[serde(default)]
    pub internal: bool,
    /// Include test and external-test imports.
    #[serde(default)]
    pub test: bool,
    /// Maximum depth to expand; `0` means unbounded.
    #[serde(default, rename = "max-depth")]
    pub max_depth: usize,
    /// Maximum number of concurrent resolver lookups.
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            internal: false,
            test: false,
            max_depth: 0,
            jobs: default_jobs(),
        }
    }
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Module resolver settings from `[importer]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImporterConfig {
    /// Go toolchain binary used for `go list` lookups.
    #[serde(default = "default_go")]
    pub go: String,
    /// Module index file to resolve from instead of the Go toolchain.
    #[serde(default)]
    pub index: Option<PathBuf>,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            go: default_go(),
            index: None,
        }
    }
}

fn default_go() -> String {
    "go".to_string()
}

impl GlobalConfig {
    /// Load the global configuration from `~/.depth/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> Result<Self, DepthError> {
        Self::load_from(&Self::default_path())
    }

    /// Load a configuration file, or return defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, DepthError> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| DepthError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        toml::from_str(&content).map_err(|e| DepthError::Config {
            message: format!("Failed to parse {}: {e}", path.display()),
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the depth data directory (`~/.depth/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".depth")
}
