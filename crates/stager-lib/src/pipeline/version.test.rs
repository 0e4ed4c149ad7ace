use super::*;
use crate::process::{MockProcessProvider, ProcessOutput};

const DESCRIBE: &[&str] = &["describe", "--tags", "--abbrev=0"];

fn tagged(tag: &str) -> MockProcessProvider {
    MockProcessProvider::new().with_result("git", DESCRIBE, Ok(ProcessOutput::succeeded(tag)))
}

#[test]
fn test_version_info_fields() {
    let info = VersionInfo::parse("1.2.3").unwrap();

    assert_eq!(info.major_minor_patch, "1.2.3");
    assert_eq!(info.assembly_sem_ver, "1.2.3.0");
    assert_eq!(info.assembly_sem_file_ver, "1.2.3.0");
    assert_eq!(info.informational, "1.2.3");
}

#[test]
fn test_prerelease_keeps_informational_suffix() {
    let info = VersionInfo::parse("v2.0.0-beta.4").unwrap();

    assert_eq!(info.major_minor_patch, "2.0.0");
    assert_eq!(info.assembly_sem_ver, "2.0.0.0");
    assert_eq!(info.informational, "2.0.0-beta.4");
    assert_eq!(info.to_string(), "2.0.0-beta.4");
}

#[test]
fn test_invalid_version_is_config_error() {
    let err = VersionInfo::parse("1.2").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidVersion { ref value, .. } if value == "1.2"));
}

#[test]
fn test_build_version_wins() {
    let process = tagged("v9.9.9\n");

    let (info, source) =
        resolve_version(Some("3.0.1"), Some("2.0.0"), Path::new("."), &process).unwrap();

    assert_eq!(info.major_minor_patch, "3.0.1");
    assert_eq!(source, VersionSource::BuildVersion);
    assert!(process.get_calls().is_empty());
}

#[test]
fn test_manifest_version_beats_git_tag() {
    let process = tagged("v9.9.9\n");

    let (info, source) = resolve_version(None, Some("2.0.0"), Path::new("."), &process).unwrap();

    assert_eq!(info.major_minor_patch, "2.0.0");
    assert_eq!(source, VersionSource::Manifest);
}

#[test]
fn test_git_tag_strips_leading_v() {
    let process = tagged("v1.4.0\n");

    let (info, source) = resolve_version(None, None, Path::new("/repo"), &process).unwrap();

    assert_eq!(info.major_minor_patch, "1.4.0");
    assert_eq!(source, VersionSource::GitTag);
    assert!(process.verify_call("git", DESCRIBE, Path::new("/repo")));
}

#[test]
fn test_fallback_without_tags() {
    let process = MockProcessProvider::new().with_result(
        "git",
        DESCRIBE,
        Ok(ProcessOutput::failed(128, "fatal: No names found")),
    );

    let (info, source) = resolve_version(None, None, Path::new("."), &process).unwrap();

    assert_eq!(info.major_minor_patch, FALLBACK_VERSION);
    assert_eq!(source, VersionSource::Fallback);
}

#[test]
fn test_non_semver_tag_falls_back() {
    let process = tagged("release-candidate\n");

    let (info, source) = resolve_version(None, None, Path::new("."), &process).unwrap();

    assert_eq!(info, VersionInfo::fallback());
    assert_eq!(source, VersionSource::Fallback);
}

#[test]
fn test_missing_git_falls_back() {
    let process = MockProcessProvider::new().with_result("git", DESCRIBE, Err("not found".to_string()));

    let (_, source) = resolve_version(None, None, Path::new("."), &process).unwrap();
    assert_eq!(source, VersionSource::Fallback);
}

#[test]
fn test_invalid_explicit_version_is_error() {
    let process = tagged("v1.0.0");
    assert!(resolve_version(Some("latest"), None, Path::new("."), &process).is_err());
    assert!(resolve_version(None, Some("one"), Path::new("."), &process).is_err());
}
