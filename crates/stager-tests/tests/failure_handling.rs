//! E2E tests for runs that stop on a failing target

#![cfg(unix)]

use anyhow::Result;
use stager_lib::application::{Commands, execute_command_with_process};
use stager_lib::primitives::BuildError;
use stager_tests::{ConditionalRule, MockBehavior, TestEnvironment};

fn failing_dotnet(subcommand: &str, error: &str) -> Result<TestEnvironment> {
    let mut env = TestEnvironment::new()?.with_git_tag(None)?;
    env.add_mock_executable(
        "dotnet",
        MockBehavior::Conditional {
            rules: vec![
                ConditionalRule::new(
                    subcommand,
                    MockBehavior::AlwaysFail {
                        error: error.to_string(),
                    },
                ),
                ConditionalRule::new(
                    "publish",
                    MockBehavior::WriteToOutput {
                        file: "app.dll".to_string(),
                    },
                ),
            ],
        },
    )?;
    env.init_repository(&["Api"])?;
    Ok(env)
}

#[test]
fn e2e_compile_error_stops_the_run() -> Result<()> {
    let env = failing_dotnet("build", "Program.cs(3,1): error CS1002: ; expected")?;
    let mut out = Vec::new();

    let err = execute_command_with_process(
        Commands::default_run(),
        &env.app_config()?,
        Box::new(env.process_provider()),
        &mut out,
    )
    .unwrap_err();

    let build_error = err
        .downcast_ref::<BuildError>()
        .expect("run failures are build errors");
    assert_eq!(build_error.failed_target(), Some("Compile"));
    assert!(err.to_string().contains("error CS1002"));

    let summary = String::from_utf8(out)?;
    assert!(summary.contains("✓ Restore"));
    assert!(summary.contains("✗ Compile"));
    assert!(summary.contains("Build failed at Compile"));
    Ok(())
}

#[test]
fn e2e_restore_failure_keeps_later_targets_from_running() -> Result<()> {
    let env = failing_dotnet("restore", "error NU1101: Unable to find package")?;

    let err = execute_command_with_process(
        Commands::Run {
            targets: vec!["Package".to_string()],
            skip: Vec::new(),
        },
        &env.app_config()?,
        Box::new(env.process_provider()),
        &mut Vec::new(),
    )
    .unwrap_err();

    assert_eq!(
        err.downcast_ref::<BuildError>().and_then(|e| e.failed_target()),
        Some("Restore")
    );
    assert_eq!(env.get_mock_subcommands("dotnet")?, vec!["restore"]);
    assert!(!env.work_file("output/artifacts").exists());
    Ok(())
}

#[test]
fn e2e_missing_toolchain_is_reported_as_command_failure() -> Result<()> {
    let env = TestEnvironment::new()?.with_git_tag(None)?;
    env.init_repository(&["Api"])?;
    std::fs::write(
        env.work_file("build.toml"),
        "toolchain = \"dotnet-missing-for-test\"\n\n[[projects]]\nname = \"Api\"\n",
    )?;

    let err = execute_command_with_process(
        Commands::default_run(),
        &env.app_config()?,
        Box::new(env.process_provider()),
        &mut Vec::new(),
    )
    .unwrap_err();

    assert_eq!(
        err.downcast_ref::<BuildError>().and_then(|e| e.failed_target()),
        Some("Restore")
    );
    assert!(err.to_string().contains("dotnet-missing-for-test"));
    Ok(())
}
