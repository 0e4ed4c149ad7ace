use super::*;
use std::error::Error;

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            for variant in <$enum_type>::value_variants() {
                let possible_value = variant
                    .to_possible_value()
                    .expect("PossibleValue should exist for all variants");
                let primary_name = possible_value.get_name();
                let parsed: $enum_type = primary_name
                    .parse()
                    .unwrap_or_else(|_| panic!("'{}' should parse", primary_name));
                assert_eq!(parsed, *variant, "Round-trip should preserve variant");
            }
        }
    };
}

test_enum_completeness!(LogLevel, test_log_level_completeness);
test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(ColorIntent, test_color_intent_completeness);
test_enum_completeness!(Configuration, test_configuration_completeness);

#[test]
fn test_fromstr_is_case_insensitive() {
    assert_eq!("Release".parse::<Configuration>().unwrap(), Configuration::Release);
    assert_eq!("DEBUG".parse::<Configuration>().unwrap(), Configuration::Debug);
    assert_eq!(" yml ".parse::<LogFormat>().unwrap(), LogFormat::Yaml);
    assert_eq!("off".parse::<ColorIntent>().unwrap(), ColorIntent::Never);
}

#[test]
fn test_fromstr_rejects_unknown_values() {
    let err = "staging".parse::<Configuration>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "staging");
            assert_eq!(reason, "invalid build configuration");
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_log_level_from_verbosity_boundary_conditions() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(u8::MAX), LogLevel::Trace);
    assert_eq!(LogLevel::Warning.as_filter(), "warn");
}

#[test]
fn test_configuration_defaults_follow_build_host() {
    assert_eq!(Configuration::default_for(false), Configuration::Debug);
    assert_eq!(Configuration::default_for(true), Configuration::Release);
    assert_eq!(Configuration::Release.to_string(), "Release");
}

#[test]
fn test_unknown_target_message_names_requirer() {
    let orphan = BuildError::UnknownTarget {
        name: "Lint".to_string(),
        required_by: None,
    };
    assert_eq!(orphan.to_string(), "Target 'Lint' is not declared");

    let nested = BuildError::UnknownTarget {
        name: "Lint".to_string(),
        required_by: Some("Compile".to_string()),
    };
    assert_eq!(
        nested.to_string(),
        "Target 'Lint' is not declared (required by 'Compile')"
    );
}

#[test]
fn test_external_command_message() {
    let err = BuildError::ExternalCommand {
        command: "dotnet build".to_string(),
        code: Some(1),
        stderr: "error CS1002: ; expected\n".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Command `dotnet build` failed with exit code 1: error CS1002: ; expected"
    );

    let killed = BuildError::ExternalCommand {
        command: "dotnet restore".to_string(),
        code: None,
        stderr: String::new(),
    };
    assert_eq!(killed.to_string(), "Command `dotnet restore` failed");
}

#[test]
fn test_target_failed_exposes_target_and_source() {
    let err = BuildError::TargetFailed {
        target: "Package".to_string(),
        source: Box::new(BuildError::MissingArtifact {
            pattern: "output/artifacts/App/App*.tar.gz".to_string(),
        }),
    };

    assert_eq!(err.failed_target(), Some("Package"));
    assert!(err.to_string().starts_with("Target 'Package' failed: "));
    let source = err.source().expect("TargetFailed should carry a source");
    assert!(source.to_string().contains("App*.tar.gz"));
}
