use stager_lib::application::config::AppConfig;
use stager_lib::application::env::EnvironmentConfig;
use stager_lib::application::CliConfig;
use stager_lib::pipeline::Manifest;
use stager_lib::primitives::{ColorIntent, ConfigError, Configuration};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.resolved_configuration(), Configuration::Debug);
}

#[test]
fn test_config_merging_integration() {
    let base_config = AppConfig::default();
    let override_config = AppConfig {
        log_level: 3,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let merged = base_config.merge_with(override_config);

    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.color, ColorIntent::Never);
    assert_eq!(merged.configuration, None);
}

#[test]
fn test_loaded_config_points_at_loadable_manifest() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join("build.toml"),
        "version = \"1.2.0\"\n\n[[projects]]\nname = \"Api\"\n",
    )
    .unwrap();
    let root_arg = root.path().to_string_lossy().to_string();

    let config = CliConfig::load_from(
        ["stager", "--root", root_arg.as_str(), "-c", "Release", "plan"],
        &EnvironmentConfig::default(),
    )
    .unwrap();
    let manifest = Manifest::load(&config.app_config.manifest_path()).unwrap();

    assert_eq!(config.app_config.resolved_configuration(), Configuration::Release);
    assert_eq!(manifest.version.as_deref(), Some("1.2.0"));
    assert_eq!(manifest.projects[0].name, "Api");
}

#[test]
fn test_file_as_root_is_rejected() {
    let root = TempDir::new().unwrap();
    let file = root.path().join("build.toml");
    fs::write(&file, "").unwrap();
    let file_arg = file.to_string_lossy().to_string();

    let err = CliConfig::load_from(
        ["stager", "--root", file_arg.as_str()],
        &EnvironmentConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidRoot { .. }));
}
