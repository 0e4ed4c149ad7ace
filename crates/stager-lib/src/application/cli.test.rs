use super::*;
use crate::primitives::{ColorIntent, Configuration, LogFormat};
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_no_subcommand() {
    let cli = Cli::try_parse_from(["stager"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(
        Commands::default_run(),
        Commands::Run {
            targets: Vec::new(),
            skip: Vec::new(),
        }
    );
}

#[test]
fn test_run_with_targets_and_skip() {
    let cli = Cli::try_parse_from([
        "stager", "run", "Package", "Compile", "--skip", "Clean", "--skip", "Restore",
    ])
    .unwrap();

    assert_eq!(
        cli.command,
        Some(Commands::Run {
            targets: vec!["Package".to_string(), "Compile".to_string()],
            skip: vec!["Clean".to_string(), "Restore".to_string()],
        })
    );
}

#[test]
fn test_plan_and_list() {
    let plan = Cli::try_parse_from(["stager", "plan", "Publish"]).unwrap();
    assert_eq!(
        plan.command,
        Some(Commands::Plan {
            targets: vec!["Publish".to_string()]
        })
    );

    let list = Cli::try_parse_from(["stager", "list"]).unwrap();
    assert_eq!(list.command, Some(Commands::List));
}

#[test]
fn test_global_options() {
    let cli = Cli::try_parse_from([
        "stager",
        "-c",
        "release",
        "--build-version",
        "2.0.0",
        "--root",
        "/repo",
        "--log-format",
        "json",
        "--color",
        "never",
        "run",
    ])
    .unwrap();

    assert_eq!(cli.config.configuration, Some(Configuration::Release));
    assert_eq!(cli.config.build_version.as_deref(), Some("2.0.0"));
    assert_eq!(cli.config.root, Some(std::path::PathBuf::from("/repo")));
    assert_eq!(cli.config.log_format, LogFormat::Json);
    assert_eq!(cli.config.color, ColorIntent::Never);
}

#[test]
fn test_configuration_value_is_case_insensitive() {
    let cli = Cli::try_parse_from(["stager", "--configuration", "Release"]).unwrap();
    assert_eq!(cli.config.configuration, Some(Configuration::Release));
}

#[test]
fn test_unknown_configuration_rejected() {
    assert!(Cli::try_parse_from(["stager", "-c", "staging"]).is_err());
}
