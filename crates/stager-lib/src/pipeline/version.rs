//! Version stamping for build and publish
//!
//! Resolution order: explicit build version, manifest `version`, latest git
//! tag, then [`FALLBACK_VERSION`].

use crate::primitives::ConfigError;
use crate::process::ProcessProvider;
use semver::Version;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

pub const FALLBACK_VERSION: &str = "0.1.0";

/// Version strings stamped into assemblies and archive names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: Version,
    /// `1.2.3`
    pub major_minor_patch: String,
    /// `1.2.3.0`
    pub assembly_sem_ver: String,
    /// `1.2.3.0`
    pub assembly_sem_file_ver: String,
    /// Full semantic version, including pre-release and build metadata
    pub informational: String,
}

impl VersionInfo {
    pub fn from_version(version: Version) -> Self {
        let major_minor_patch = format!("{}.{}.{}", version.major, version.minor, version.patch);
        let assembly = format!("{}.0", major_minor_patch);
        Self {
            informational: version.to_string(),
            assembly_sem_ver: assembly.clone(),
            assembly_sem_file_ver: assembly,
            major_minor_patch,
            version,
        }
    }

    /// Parse `1.2.3`, `v1.2.3` or `1.2.3-beta.1`
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let trimmed = value.trim();
        let stripped = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        Version::parse(stripped)
            .map(Self::from_version)
            .map_err(|source| ConfigError::InvalidVersion {
                value: value.to_string(),
                source,
            })
    }

    pub fn fallback() -> Self {
        Self::from_version(Version::new(0, 1, 0))
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.informational)
    }
}

/// Where the resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    BuildVersion,
    Manifest,
    GitTag,
    Fallback,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BuildVersion => "build version",
            Self::Manifest => "manifest",
            Self::GitTag => "git tag",
            Self::Fallback => "fallback",
        };
        f.write_str(label)
    }
}

/// Pick the version for this run
///
/// Explicit values that fail to parse are errors; an unusable git tag only
/// falls through to the fallback.
pub fn resolve_version(
    build_version: Option<&str>,
    manifest_version: Option<&str>,
    root: &Path,
    process: &dyn ProcessProvider,
) -> Result<(VersionInfo, VersionSource), ConfigError> {
    if let Some(value) = build_version.filter(|v| !v.trim().is_empty()) {
        return Ok((VersionInfo::parse(value)?, VersionSource::BuildVersion));
    }

    if let Some(value) = manifest_version.filter(|v| !v.trim().is_empty()) {
        return Ok((VersionInfo::parse(value)?, VersionSource::Manifest));
    }

    if let Some(version) = latest_git_tag(root, process) {
        return Ok((version, VersionSource::GitTag));
    }

    Ok((VersionInfo::fallback(), VersionSource::Fallback))
}

fn latest_git_tag(root: &Path, process: &dyn ProcessProvider) -> Option<VersionInfo> {
    let output = match process.execute("git", &["describe", "--tags", "--abbrev=0"], root) {
        Ok(output) if output.success => output,
        Ok(output) => {
            debug!(stderr = %output.stderr.trim_end(), "No git tag available");
            return None;
        }
        Err(e) => {
            debug!(error = %e, "git not available");
            return None;
        }
    };

    let tag = output.stdout.trim();
    match VersionInfo::parse(tag) {
        Ok(version) => Some(version),
        Err(e) => {
            warn!(tag, error = %e, "Ignoring git tag that is not a semantic version");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    include!("version.test.rs");
}
