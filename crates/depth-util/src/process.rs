use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Output};

use crate::errors::DepthError;

/// Builder for constructing and executing external processes.
///
/// Used to query external toolchains (e.g. `go list`) for module metadata.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append an argument only when `cond` holds.
    pub fn arg_if(self, cond: bool, arg: impl Into<String>) -> Self {
        if cond {
            self.arg(arg)
        } else {
            self
        }
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the child process. Empty paths are ignored.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if !dir.as_os_str().is_empty() {
            self.cwd = Some(dir);
        }
        self
    }

    /// Execute the command and return its output, whatever the exit status.
    pub fn exec(&self) -> Result<Output, DepthError> {
        tracing::debug!("Running `{self}`");
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
        cmd.output().map_err(DepthError::from)
    }

    /// Execute the command and return its stdout, failing on a non-zero exit status.
    pub fn exec_stdout(&self) -> Result<Vec<u8>, DepthError> {
        let output = self.exec()?;
        if output.status.success() {
            return Ok(output.stdout);
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(DepthError::Generic {
            message: format!("`{self}` failed ({}): {}", output.status, stderr.trim()),
        })
    }
}

impl fmt::Display for CommandBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
