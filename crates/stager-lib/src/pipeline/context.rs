//! Read-only run context and artifact path conventions

use super::manifest::Manifest;
use super::version::VersionInfo;
use crate::primitives::Configuration;
use std::path::{Path, PathBuf};

/// A project that gets published and packaged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    /// Absolute project file
    pub file: PathBuf,
}

impl Project {
    /// Directory holding the project file, where Dockerfiles live
    pub fn directory(&self) -> &Path {
        self.file.parent().unwrap_or(Path::new("."))
    }
}

/// Everything a target action may read
///
/// Built once before any target runs. All paths are absolute.
#[derive(Debug, Clone)]
pub struct RunContext {
    configuration: Configuration,
    root: PathBuf,
    source_dir: PathBuf,
    output_dir: PathBuf,
    solution: PathBuf,
    toolchain: String,
    projects: Vec<Project>,
    version: VersionInfo,
}

impl RunContext {
    /// Resolve manifest paths against `root`
    pub fn new(
        root: &Path,
        manifest: &Manifest,
        configuration: Configuration,
        version: VersionInfo,
    ) -> Self {
        let projects = manifest
            .projects
            .iter()
            .map(|entry| Project {
                name: entry.name.trim().to_string(),
                file: root.join(manifest.project_file(entry)),
            })
            .collect();

        Self {
            configuration,
            root: root.to_path_buf(),
            source_dir: root.join(&manifest.source_dir),
            output_dir: root.join(&manifest.output_dir),
            solution: root.join(manifest.solution_path()),
            toolchain: manifest.toolchain.clone(),
            projects,
            version,
        }
    }

    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn solution(&self) -> &Path {
        &self.solution
    }

    pub fn toolchain(&self) -> &str {
        &self.toolchain
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn version(&self) -> &VersionInfo {
        &self.version
    }

    pub fn publish_dir(&self) -> PathBuf {
        self.output_dir.join("publish")
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.output_dir.join("artifacts")
    }

    pub fn publish_dir_for(&self, project: &str) -> PathBuf {
        self.publish_dir().join(project)
    }

    pub fn artifact_dir_for(&self, project: &str) -> PathBuf {
        self.artifacts_dir().join(project)
    }

    /// `<project>-<major.minor.patch>`, the archive's single top-level entry
    pub fn archive_root_name(&self, project: &str) -> String {
        format!("{}-{}", project, self.version.major_minor_patch)
    }

    pub fn archive_path_for(&self, project: &str) -> PathBuf {
        self.artifact_dir_for(project)
            .join(format!("{}.tar.gz", self.archive_root_name(project)))
    }

    /// Pattern the Package target declares for `project`
    pub fn artifact_pattern_for(&self, project: &str) -> String {
        self.artifact_dir_for(project)
            .join(format!("{}*.tar.gz", project))
            .to_string_lossy()
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    include!("context.test.rs");
}
