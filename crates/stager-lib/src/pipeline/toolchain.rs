//! Compiler toolchain invocation (`dotnet` CLI)

use super::version::VersionInfo;
use crate::primitives::{BuildResult, Configuration};
use crate::process::{self, ProcessProvider};
use std::path::Path;

/// restore / build / publish over a process provider
///
/// Every command runs in `working_dir`; a non-zero exit becomes
/// [`BuildError::ExternalCommand`](crate::primitives::BuildError::ExternalCommand).
pub struct DotNet<'a> {
    program: &'a str,
    working_dir: &'a Path,
    process: &'a dyn ProcessProvider,
}

impl<'a> DotNet<'a> {
    pub fn new(program: &'a str, working_dir: &'a Path, process: &'a dyn ProcessProvider) -> Self {
        Self {
            program,
            working_dir,
            process,
        }
    }

    pub fn restore(&self, solution: &Path) -> BuildResult<()> {
        let solution = solution.to_string_lossy();
        self.run("restore", &[&*solution])
    }

    pub fn build(
        &self,
        solution: &Path,
        configuration: Configuration,
        version: &VersionInfo,
    ) -> BuildResult<()> {
        let solution = solution.to_string_lossy();
        let properties = version_properties(version);

        let mut args: Vec<&str> = vec![
            &*solution,
            "--configuration",
            configuration.as_str(),
            "--no-restore",
        ];
        args.extend(properties.iter().map(String::as_str));
        self.run("build", &args)
    }

    pub fn publish(
        &self,
        project: &Path,
        output: &Path,
        configuration: Configuration,
        version: &VersionInfo,
    ) -> BuildResult<()> {
        let project = project.to_string_lossy();
        let output = output.to_string_lossy();
        let properties = version_properties(version);

        let mut args: Vec<&str> = vec![
            &*project,
            "--output",
            &*output,
            "--configuration",
            configuration.as_str(),
            "--no-restore",
        ];
        args.extend(properties.iter().map(String::as_str));
        self.run("publish", &args)
    }

    fn run(&self, subcommand: &str, rest: &[&str]) -> BuildResult<()> {
        let mut args = Vec::with_capacity(rest.len() + 1);
        args.push(subcommand);
        args.extend_from_slice(rest);

        let label = format!("{} {}", self.program, subcommand);
        process::run_checked(self.process, &label, self.program, &args, self.working_dir)?;
        Ok(())
    }
}

/// MSBuild properties stamping assembly metadata
pub fn version_properties(version: &VersionInfo) -> Vec<String> {
    vec![
        format!("-p:AssemblyVersion={}", version.assembly_sem_ver),
        format!("-p:FileVersion={}", version.assembly_sem_file_ver),
        format!("-p:InformationalVersion={}", version.informational),
    ]
}

#[cfg(test)]
mod tests {
    include!("toolchain.test.rs");
}
