//! External process execution
//!
//! Target actions never spawn processes directly; they go through a
//! [`ProcessProvider`] so tests can substitute [`MockProcessProvider`].

#[cfg(any(test, feature = "test-utils"))]
mod mock;

#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockProcessProvider, ProcessCall};

use crate::primitives::{BuildError, BuildResult};
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::{debug, trace};

/// Captured result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl ProcessOutput {
    pub fn succeeded(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
            code: Some(code),
        }
    }
}

/// Provider trait for process execution
pub trait ProcessProvider {
    /// Execute a command with given arguments in working directory
    ///
    /// An `Err` means the process could not be started at all; a non-zero
    /// exit is reported through [`ProcessOutput::success`].
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<ProcessOutput>;
}

/// Lets a caller keep a handle on a provider it also hands to a [`BuildEnv`](crate::pipeline::BuildEnv)
impl<P: ProcessProvider + ?Sized> ProcessProvider for std::rc::Rc<P> {
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<ProcessOutput> {
        (**self).execute(command, args, working_dir)
    }
}

/// Run a command and turn spawn failures and non-zero exits into [`BuildError::ExternalCommand`]
///
/// `label` is the short form used in error messages, e.g. `dotnet build`.
pub fn run_checked(
    provider: &dyn ProcessProvider,
    label: &str,
    command: &str,
    args: &[&str],
    working_dir: &Path,
) -> BuildResult<ProcessOutput> {
    debug!(command, args = %args.join(" "), dir = %working_dir.display(), "Executing");

    let output = provider
        .execute(command, args, working_dir)
        .map_err(|e| BuildError::ExternalCommand {
            command: label.to_string(),
            code: None,
            stderr: format!("{:#}", e),
        })?;

    if !output.stdout.is_empty() {
        trace!(command = label, stdout = %output.stdout.trim_end(), "Process output");
    }

    if !output.success {
        return Err(BuildError::ExternalCommand {
            command: label.to_string(),
            code: output.code,
            stderr: output.stderr,
        });
    }
    Ok(output)
}

/// Spawns real processes
pub struct LiveProcessProvider {
    /// Custom PATH override for hermetic testing
    custom_path: Option<String>,
}

impl LiveProcessProvider {
    /// Create a new LiveProcessProvider with system PATH
    pub fn new() -> Self {
        Self { custom_path: None }
    }

    /// Create a LiveProcessProvider with custom PATH for hermetic testing
    pub fn with_custom_path(path: impl Into<String>) -> Self {
        Self {
            custom_path: Some(path.into()),
        }
    }

    /// Prepend `bin_dir` to the current PATH
    pub fn with_prepended_path(bin_dir: &Path) -> Self {
        let current_path = std::env::var_os("PATH").unwrap_or_default();
        let mut entries = vec![bin_dir.to_path_buf()];
        entries.extend(std::env::split_paths(&current_path));
        match std::env::join_paths(entries) {
            Ok(joined) => Self::with_custom_path(joined.to_string_lossy().into_owned()),
            Err(_) => Self::with_custom_path(bin_dir.to_string_lossy().into_owned()),
        }
    }
}

impl Default for LiveProcessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProvider for LiveProcessProvider {
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<ProcessOutput> {
        let mut cmd = Command::new(resolve_program(command, self.custom_path.as_deref()));
        cmd.args(args).current_dir(working_dir);

        if let Some(custom_path) = &self.custom_path {
            cmd.env("PATH", custom_path);
        }

        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute command: {}", command))?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// `Command` looks programs up in the parent's PATH, not the child's; search
/// the override ourselves so hermetic runs pick up the intended executable.
fn resolve_program(command: &str, custom_path: Option<&str>) -> std::path::PathBuf {
    let Some(search) = custom_path else {
        return command.into();
    };
    if Path::new(command).components().count() > 1 {
        return command.into();
    }

    std::env::split_paths(search)
        .map(|dir| dir.join(command))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| command.into())
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
