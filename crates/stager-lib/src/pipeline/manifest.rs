//! Build manifest (`build.toml`)
//!
//! Declares what the standard targets operate on: the solution handed to the
//! toolchain and the projects that get published and packaged.

use crate::primitives::ConfigError;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MANIFEST_FILE_NAME: &str = "build.toml";

/// Top-level build.toml configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Manifest {
    /// Solution or project file passed to restore/build; defaults to the source directory
    #[serde(default)]
    pub solution: Option<PathBuf>,

    /// Toolchain executable
    #[serde(default = "default_toolchain")]
    pub toolchain: String,

    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Fixed version; when absent the latest git tag is used
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

/// One publishable project
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectEntry {
    pub name: String,

    /// Project file; defaults to `<source-dir>/<name>/<name>.csproj`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_toolchain() -> String {
    "dotnet".to_string()
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            solution: None,
            toolchain: default_toolchain(),
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
            version: None,
            projects: Vec::new(),
        }
    }
}

impl Manifest {
    /// Read, parse and validate a manifest file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ConfigError::ManifestNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::ManifestReadError {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let manifest = Self::parse(&content, path)?;
        debug!(
            manifest = %path.display(),
            projects = manifest.projects.len(),
            "Loaded build manifest"
        );
        Ok(manifest)
    }

    /// Parse and validate manifest text; `origin` only labels errors
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let manifest: Manifest =
            toml::from_str(content).map_err(|source| ConfigError::ManifestParseError {
                path: origin.to_path_buf(),
                source,
            })?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.toolchain.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "toolchain must not be empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            let name = project.name.trim();
            if name.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    reason: "project name must not be empty".to_string(),
                });
            }
            if name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(ConfigError::ValidationFailed {
                    reason: format!("project name '{}' must be a plain file name", name),
                });
            }
            if !seen.insert(name) {
                return Err(ConfigError::ValidationFailed {
                    reason: format!("duplicate project name '{}'", name),
                });
            }
        }
        Ok(())
    }

    /// Project file for `entry`, relative to the repository root unless absolute
    pub fn project_file(&self, entry: &ProjectEntry) -> PathBuf {
        match &entry.path {
            Some(path) => path.clone(),
            None => {
                let name = entry.name.trim();
                self.source_dir.join(name).join(format!("{}.csproj", name))
            }
        }
    }

    /// Solution passed to restore and build
    pub fn solution_path(&self) -> PathBuf {
        self.solution
            .clone()
            .unwrap_or_else(|| self.source_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    include!("manifest.test.rs");
}
