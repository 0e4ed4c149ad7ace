use super::*;

fn env(configure: impl FnOnce(&mut EnvironmentConfig)) -> EnvironmentConfig {
    let mut config = EnvironmentConfig::default();
    configure(&mut config);
    config
}

#[test]
fn test_no_color_environment_variable() {
    let config = env(|e| e.no_color = Some("1".to_string()));
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_force_color_environment_variable() {
    let config = env(|e| e.force_color = Some("1".to_string()));
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Always);
}

#[test]
fn test_environment_variable_precedence() {
    let config = env(|e| {
        e.clicolor = Some("0".to_string());
        e.no_color = Some("1".to_string());
        e.force_color = Some("1".to_string());
    });

    // FORCE_COLOR=1 wins over NO_COLOR and CLICOLOR
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Always);
}

#[test]
fn test_ci_disables_color() {
    let config = env(|e| {
        e.ci = Some("true".to_string());
        e.force_color = Some("1".to_string());
    });
    assert_eq!(config.apply_color_config(ColorIntent::Always), ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let config = env(|e| e.no_color = Some(String::new()));
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
}

#[test]
fn test_invalid_force_color_is_ignored() {
    let config = env(|e| e.force_color = Some("maybe".to_string()));
    assert_eq!(config.apply_color_config(ColorIntent::Never), ColorIntent::Never);
}

#[test]
fn test_local_run_is_not_server_build() {
    assert!(!EnvironmentConfig::default().is_server_build());
}

#[test]
fn test_server_markers_detected() {
    assert!(env(|e| e.ci = Some("true".to_string())).is_server_build());
    assert!(env(|e| e.tf_build = Some("True".to_string())).is_server_build());
    assert!(env(|e| e.github_actions = Some("true".to_string())).is_server_build());
    assert!(env(|e| e.gitlab_ci = Some("true".to_string())).is_server_build());
    assert!(env(|e| e.jenkins_url = Some("http://jenkins:8080/".to_string())).is_server_build());
    assert!(env(|e| e.teamcity_version = Some("2024.03".to_string())).is_server_build());
}

#[test]
fn test_explicitly_disabled_markers_ignored() {
    assert!(!env(|e| e.ci = Some("false".to_string())).is_server_build());
    assert!(!env(|e| e.ci = Some("0".to_string())).is_server_build());
    assert!(!env(|e| e.github_actions = Some(String::new())).is_server_build());
}
