use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all depth operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DepthError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration (e.g. `~/.depth/config.toml`).
    #[error("Config error: {message}")]
    #[diagnostic(help("Check ~/.depth/config.toml for syntax errors"))]
    Config { message: String },

    /// Invalid or unreadable module index file.
    #[error("Index error: {message}")]
    #[diagnostic(help("Module index files list [[module]] tables with a `path` key"))]
    Index { message: String },

    /// A single module could not be located or its metadata could not be read.
    #[error("Failed to import '{name}': {message}")]
    Import { name: String, message: String },

    /// The requested root module could not be located at all.
    #[error("unable to resolve root package")]
    RootNotResolved { name: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl DepthError {
    /// Shorthand for an [`DepthError::Import`] failure.
    pub fn import(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Import {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type DepthResult<T> = miette::Result<T>;
