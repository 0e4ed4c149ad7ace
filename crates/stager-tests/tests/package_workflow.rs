//! E2E tests running the Package target against mock `dotnet` and `git`
//!
//! Real processes, real filesystem; only the executables are stand-ins.

#![cfg(unix)]

use anyhow::Result;
use flate2::read::GzDecoder;
use stager_lib::application::{Commands, execute_command_with_process};
use stager_tests::TestEnvironment;
use std::fs::File;
use std::path::PathBuf;
use tar::Archive;

fn run(targets: &[&str]) -> Commands {
    Commands::Run {
        targets: targets.iter().map(|s| s.to_string()).collect(),
        skip: Vec::new(),
    }
}

fn archive_entries(path: PathBuf) -> Result<Vec<String>> {
    let mut archive = Archive::new(GzDecoder::new(File::open(path)?));
    let mut names = Vec::new();
    for entry in archive.entries()? {
        names.push(entry?.path()?.to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}

#[test]
fn e2e_package_archives_every_project() -> Result<()> {
    let env = TestEnvironment::new()?
        .with_working_dotnet()?
        .with_git_tag(Some("v2.3.1"))?;
    env.init_repository(&["Api", "Worker"])?;
    let mut out = Vec::new();

    execute_command_with_process(
        run(&["Package"]),
        &env.app_config()?,
        Box::new(env.process_provider()),
        &mut out,
    )?;

    assert_eq!(
        env.get_mock_subcommands("dotnet")?,
        vec!["restore", "publish", "publish"]
    );

    let entries = archive_entries(env.work_file("output/artifacts/Api/Api-2.3.1.tar.gz"))?;
    assert!(entries.contains(&"Api-2.3.1/app.dll".to_string()));
    assert!(entries.contains(&"Api-2.3.1/Dockerfile".to_string()));
    assert!(env.work_file("output/artifacts/Worker/Worker-2.3.1.tar.gz").is_file());

    let summary = String::from_utf8(out)?;
    assert!(summary.contains("✓ Package"));
    assert!(summary.lines().last().unwrap_or("").starts_with("Build succeeded in "));
    Ok(())
}

#[test]
fn e2e_publish_passes_configuration_and_version() -> Result<()> {
    let env = TestEnvironment::new()?
        .with_working_dotnet()?
        .with_git_tag(None)?;
    env.init_repository(&["Api"])?;
    let mut config = env.app_config()?;
    config.build_version = Some("4.0.0-rc.1".to_string());
    config.configuration = Some(stager_lib::primitives::Configuration::Release);

    execute_command_with_process(
        run(&["Publish"]),
        &config,
        Box::new(env.process_provider()),
        &mut Vec::new(),
    )?;

    assert!(env.get_mock_calls("git")?.is_empty());
    let calls = env.get_mock_calls("dotnet")?;
    let publish = calls
        .iter()
        .find(|call| call.starts_with("publish"))
        .expect("publish was called");
    assert!(publish.contains("--configuration Release"));
    assert!(publish.contains("-p:AssemblyVersion=4.0.0.0"));
    assert!(publish.contains("-p:InformationalVersion=4.0.0-rc.1"));
    assert!(env.work_file("output/publish/Api/app.dll").is_file());
    Ok(())
}

#[test]
fn e2e_untagged_repository_uses_fallback_version() -> Result<()> {
    let env = TestEnvironment::new()?
        .with_working_dotnet()?
        .with_git_tag(None)?;
    env.init_repository(&["Api"])?;

    execute_command_with_process(
        run(&["Package"]),
        &env.app_config()?,
        Box::new(env.process_provider()),
        &mut Vec::new(),
    )?;

    assert_eq!(env.get_mock_subcommands("git")?, vec!["describe"]);
    assert!(env.work_file("output/artifacts/Api/Api-0.1.0.tar.gz").is_file());
    Ok(())
}
