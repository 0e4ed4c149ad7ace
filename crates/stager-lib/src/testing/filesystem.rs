//! Filesystem fixtures laying out a buildable repository
//!
//! A [`ProjectFixture`] owns a temporary directory containing a `build.toml`,
//! a solution file and one directory per project with a project file and a
//! Dockerfile. The directory is removed when the fixture drops.

use crate::pipeline::{MANIFEST_FILE_NAME, Manifest, RunContext, VersionInfo};
use crate::primitives::Configuration;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Temporary repository with automatic cleanup
pub struct ProjectFixture {
    /// The temporary directory (automatically cleaned up on drop)
    pub temp_dir: TempDir,
}

impl ProjectFixture {
    /// Empty temporary directory
    pub fn new() -> FixtureResult<Self> {
        let temp_dir = tempfile::tempdir()?;
        Ok(Self { temp_dir })
    }

    /// Repository with `src/App.sln` and the named projects under `src/`
    pub fn with_projects(names: &[&str]) -> FixtureResult<Self> {
        let fixture = Self::new()?;

        let mut manifest = String::from("solution = \"src/App.sln\"\n");
        for name in names {
            manifest.push_str(&format!("\n[[projects]]\nname = \"{}\"\n", name));
            fixture.write_file(
                &format!("src/{0}/{0}.csproj", name),
                "<Project Sdk=\"Microsoft.NET.Sdk\" />\n",
            )?;
            fixture.write_file(
                &format!("src/{}/Dockerfile", name),
                "FROM mcr.microsoft.com/dotnet/runtime:8.0\n",
            )?;
        }
        fixture.write_file(MANIFEST_FILE_NAME, &manifest)?;
        fixture.write_file("src/App.sln", "Microsoft Visual Studio Solution File\n")?;

        Ok(fixture)
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path().join(MANIFEST_FILE_NAME)
    }

    /// Create a subdirectory within the temporary directory
    pub fn create_dir(&self, subdir: &str) -> FixtureResult<PathBuf> {
        let dir_path = self.path().join(subdir);
        fs::create_dir_all(&dir_path)?;
        Ok(dir_path)
    }

    /// Write content to a file, creating parent directories
    pub fn write_file(&self, file_path: &str, content: &str) -> FixtureResult<PathBuf> {
        let full_path = self.path().join(file_path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, content)?;
        Ok(full_path)
    }

    pub fn read_file(&self, file_path: &str) -> FixtureResult<String> {
        Ok(fs::read_to_string(self.path().join(file_path))?)
    }

    pub fn file_exists(&self, file_path: &str) -> bool {
        self.path().join(file_path).exists()
    }

    /// Run context from the fixture's manifest
    pub fn context(&self, configuration: Configuration, version: &str) -> FixtureResult<RunContext> {
        let manifest = Manifest::load(&self.manifest_path())?;
        Ok(RunContext::new(
            self.path(),
            &manifest,
            configuration,
            VersionInfo::parse(version)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
