use super::*;
use crate::primitives::{ColorIntent, Configuration};
use std::path::PathBuf;
use tempfile::TempDir;

fn server_env() -> EnvironmentConfig {
    EnvironmentConfig {
        github_actions: Some("true".to_string()),
        ..EnvironmentConfig::default()
    }
}

fn load(root: &TempDir, extra: &[&str], env_config: &EnvironmentConfig) -> CliConfig {
    let root_arg = root.path().to_string_lossy().to_string();
    let mut args = vec!["stager", "--root", root_arg.as_str()];
    args.extend_from_slice(extra);
    CliConfig::load_from(args, env_config).unwrap()
}

#[test]
fn test_config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 2);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.configuration, None);
    assert!(!config.server_build);
}

#[test]
fn test_config_merging() {
    let base = AppConfig {
        build_version: Some("1.0.0".to_string()),
        ..AppConfig::default()
    };
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        configuration: Some(Configuration::Release),
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.configuration, Some(Configuration::Release));
    assert_eq!(merged.build_version.as_deref(), Some("1.0.0"));
}

#[test]
fn test_local_default_configuration_is_debug() {
    let root = TempDir::new().unwrap();
    let config = load(&root, &[], &EnvironmentConfig::default());

    assert_eq!(config.app_config.resolved_configuration(), Configuration::Debug);
    assert!(config.command.is_none());
}

#[test]
fn test_server_default_configuration_is_release() {
    let root = TempDir::new().unwrap();
    let config = load(&root, &[], &server_env());

    assert!(config.app_config.server_build);
    assert_eq!(config.app_config.resolved_configuration(), Configuration::Release);
}

#[test]
fn test_cli_configuration_beats_server_default() {
    let root = TempDir::new().unwrap();
    let config = load(&root, &["-c", "debug", "list"], &server_env());

    assert_eq!(config.app_config.resolved_configuration(), Configuration::Debug);
}

#[test]
fn test_environment_color_applies_below_cli() {
    let root = TempDir::new().unwrap();
    let no_color = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let from_env = load(&root, &[], &no_color);
    assert_eq!(from_env.app_config.color, ColorIntent::Never);
    assert!(!from_env.app_config.to_logger_config().color);

    let from_cli = load(&root, &["--color", "always"], &no_color);
    assert_eq!(from_cli.app_config.color, ColorIntent::Always);
    assert!(from_cli.app_config.to_logger_config().color);
}

#[test]
fn test_root_is_canonicalized_and_manifest_defaults_into_it() {
    let root = TempDir::new().unwrap();
    let config = load(&root, &[], &EnvironmentConfig::default());

    let canonical = root.path().canonicalize().unwrap();
    assert_eq!(config.app_config.root_dir(), canonical.as_path());
    assert_eq!(config.app_config.manifest_path(), canonical.join("build.toml"));
}

#[test]
fn test_relative_manifest_is_anchored_at_root() {
    let root = TempDir::new().unwrap();
    let config = load(&root, &["--manifest", "ci/build.toml"], &EnvironmentConfig::default());

    let canonical = root.path().canonicalize().unwrap();
    assert_eq!(
        config.app_config.manifest_path(),
        canonical.join(PathBuf::from("ci/build.toml"))
    );
}

#[test]
fn test_missing_root_is_invalid() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nope").to_string_lossy().to_string();

    let err = CliConfig::load_from(
        ["stager", "--root", missing.as_str()],
        &EnvironmentConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRoot { .. }));
}

#[test]
fn test_unknown_arguments_are_parse_errors() {
    let err = CliConfig::load_from(["stager", "--frobnicate"], &EnvironmentConfig::default())
        .unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}
