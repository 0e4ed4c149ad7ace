//! E2E tests for the Clean target
//!
//! These tests use real filesystems (tempfile) to verify that Clean removes
//! build output and leaves sources alone.

#![cfg(unix)]

use anyhow::Result;
use stager_lib::application::{Commands, execute_command_with_process};
use stager_tests::TestEnvironment;
use std::fs;

fn clean() -> Commands {
    Commands::Run {
        targets: vec!["Clean".to_string()],
        skip: Vec::new(),
    }
}

#[test]
fn e2e_clean_removes_build_output() -> Result<()> {
    let env = TestEnvironment::new()?
        .with_working_dotnet()?
        .with_git_tag(None)?;
    env.init_repository(&["Api"])?;
    for stale in [
        "src/Api/bin/Debug/net8.0/Api.dll",
        "src/Api/obj/project.assets.json",
        "output/artifacts/Api/Api-0.0.9.tar.gz",
    ] {
        let path = env.work_file(stale);
        fs::create_dir_all(path.parent().expect("stale files have parents"))?;
        fs::write(path, "stale")?;
    }

    for _ in 0..2 {
        execute_command_with_process(
            clean(),
            &env.app_config()?,
            Box::new(env.process_provider()),
            &mut Vec::new(),
        )?;

        assert!(!env.work_file("src/Api/bin").exists());
        assert!(!env.work_file("src/Api/obj").exists());
        assert!(env.work_file("src/Api/Api.csproj").is_file());
        assert!(env.work_file("output").is_dir());
        assert_eq!(fs::read_dir(env.work_file("output"))?.count(), 0);
    }

    assert!(env.get_mock_calls("dotnet")?.is_empty());
    Ok(())
}

#[test]
fn e2e_skipping_clean_keeps_previous_artifacts() -> Result<()> {
    let env = TestEnvironment::new()?
        .with_working_dotnet()?
        .with_git_tag(None)?;
    env.init_repository(&["Api"])?;
    fs::create_dir_all(env.work_file("output/artifacts"))?;
    fs::write(env.work_file("output/artifacts/keep.txt"), "keep")?;

    execute_command_with_process(
        Commands::Run {
            targets: vec!["Publish".to_string()],
            skip: vec!["Clean".to_string()],
        },
        &env.app_config()?,
        Box::new(env.process_provider()),
        &mut Vec::new(),
    )?;

    assert!(env.work_file("output/artifacts/keep.txt").is_file());
    assert!(env.work_file("output/publish/Api/app.dll").is_file());
    Ok(())
}
