use super::*;

#[test]
fn test_default_filter_scopes_level_to_own_crates() {
    assert_eq!(
        default_filter(LogLevel::Debug),
        "stager_lib=debug,stager=debug,warn"
    );
    assert_eq!(
        default_filter(LogLevel::Error),
        "stager_lib=error,stager=error,warn"
    );
}

#[test]
fn test_default_filter_parses() {
    for verbosity in 0..=4 {
        let directives = default_filter(LogLevel::from_verbosity(verbosity));
        assert!(
            EnvFilter::try_new(&directives).is_ok(),
            "'{}' should be a valid filter",
            directives
        );
    }
}

#[test]
fn test_logger_global_consistent_with_initialized_flag() {
    // Other tests in this binary may have initialized the logger already.
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}
