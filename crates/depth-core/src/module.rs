use serde::{Deserialize, Serialize};

/// How much of a module a resolver lookup should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Resolve identity, location and the full import lists.
    #[default]
    Full,
    /// Resolve identity and location only; import lists stay empty.
    FindOnly,
}

/// Metadata a resolver reports for one module.
///
/// Doubles as the `[[module]]` entry of a module index file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleInfo {
    /// Canonical, fully-qualified module path.
    pub path: String,
    /// Directory the module lives in; children resolve relative to it.
    #[serde(default)]
    pub dir: String,
    /// Whether the module ships with the platform distribution.
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub test_imports: Vec<String>,
    #[serde(default)]
    pub xtest_imports: Vec<String>,
}

impl ModuleInfo {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn internal(mut self) -> Self {
        self.internal = true;
        self
    }

    pub fn imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn test_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.test_imports = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn xtest_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.xtest_imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Drop everything a `FindOnly` lookup must not report.
    pub fn located_only(mut self) -> Self {
        self.imports.clear();
        self.test_imports.clear();
        self.xtest_imports.clear();
        self
    }

    /// Direct imports, followed by test and external-test imports when `with_tests` is set.
    ///
    /// Each entry is paired with whether it comes from a test-only list.
    pub fn candidate_imports(&self, with_tests: bool) -> Vec<(&str, bool)> {
        let mut out: Vec<(&str, bool)> =
            self.imports.iter().map(|i| (i.as_str(), false)).collect();
        if with_tests {
            out.extend(
                self.test_imports
                    .iter()
                    .chain(&self.xtest_imports)
                    .map(|i| (i.as_str(), true)),
            );
        }
        out
    }
}
