use super::*;
use std::path::PathBuf;

#[test]
fn test_run_checked_passes_successful_output_through() {
    let provider = MockProcessProvider::new().with_result(
        "git",
        &["describe", "--tags", "--abbrev=0"],
        Ok(ProcessOutput::succeeded("v1.4.0\n")),
    );

    let output = run_checked(
        &provider,
        "git describe",
        "git",
        &["describe", "--tags", "--abbrev=0"],
        Path::new("/work"),
    )
    .unwrap();

    assert_eq!(output.stdout, "v1.4.0\n");
    assert!(provider.verify_call("git", &["describe", "--tags", "--abbrev=0"], Path::new("/work")));
}

#[test]
fn test_run_checked_maps_non_zero_exit() {
    let provider = MockProcessProvider::new().fails_on("build", "error CS1002: ; expected\n");

    let err = run_checked(&provider, "dotnet build", "dotnet", &["build", "App.sln"], Path::new("."))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Command `dotnet build` failed with exit code 1: error CS1002: ; expected"
    );
}

#[test]
fn test_run_checked_maps_spawn_failure() {
    let provider = MockProcessProvider::new().with_result(
        "dotnet",
        &["restore"],
        Err("No such file or directory".to_string()),
    );

    let err = run_checked(&provider, "dotnet restore", "dotnet", &["restore"], Path::new("."))
        .unwrap_err();

    match err {
        BuildError::ExternalCommand { command, code, stderr } => {
            assert_eq!(command, "dotnet restore");
            assert_eq!(code, None);
            assert!(stderr.contains("No such file or directory"));
        }
        other => panic!("Expected ExternalCommand, got {:?}", other),
    }
}

#[test]
fn test_mock_records_calls_and_runs_hooks() {
    let temp = tempfile::TempDir::new().unwrap();
    let output_dir = temp.path().join("publish/App");
    let output_arg = output_dir.to_string_lossy().to_string();
    let provider = MockProcessProvider::new().creating_publish_output();

    provider
        .execute("dotnet", &["restore", "App.sln"], temp.path())
        .unwrap();
    provider
        .execute("dotnet", &["publish", "App.csproj", "--output", &output_arg], temp.path())
        .unwrap();

    assert_eq!(provider.subcommands(), vec!["restore", "publish"]);
    let publish = provider.get_calls_for_subcommand("publish");
    assert_eq!(publish.len(), 1);
    assert_eq!(publish[0].flag_value("--output"), Some(output_arg.as_str()));
    assert!(output_dir.join("app.dll").is_file());
}

#[test]
fn test_failing_subcommand_skips_hooks() {
    let temp = tempfile::TempDir::new().unwrap();
    let output_dir = temp.path().join("publish/App");
    let output_arg = output_dir.to_string_lossy().to_string();
    let provider = MockProcessProvider::new()
        .creating_publish_output()
        .fails_on("publish", "NETSDK1004");

    let output = provider
        .execute("dotnet", &["publish", "--output", &output_arg], temp.path())
        .unwrap();

    assert!(!output.success);
    assert_eq!(output.code, Some(1));
    assert!(!output_dir.exists());
}

#[test]
fn test_resolve_program_prefers_custom_path() {
    let temp = tempfile::TempDir::new().unwrap();
    let tool = temp.path().join("dotnet");
    std::fs::write(&tool, "#!/bin/sh\n").unwrap();
    let search = temp.path().to_string_lossy().to_string();

    assert_eq!(resolve_program("dotnet", Some(&search)), tool);
    assert_eq!(resolve_program("dotnet", None), PathBuf::from("dotnet"));
    assert_eq!(resolve_program("git", Some(&search)), PathBuf::from("git"));
}

#[cfg(unix)]
#[test]
fn test_live_provider_reports_exit_status() {
    let provider = LiveProcessProvider::new();
    let temp = tempfile::TempDir::new().unwrap();

    let ok = provider
        .execute("sh", &["-c", "echo hello"], temp.path())
        .unwrap();
    assert!(ok.success);
    assert_eq!(ok.stdout.trim(), "hello");

    let failed = provider
        .execute("sh", &["-c", "echo oops >&2; exit 3"], temp.path())
        .unwrap();
    assert!(!failed.success);
    assert_eq!(failed.code, Some(3));
    assert_eq!(failed.stderr.trim(), "oops");
}

#[test]
fn test_live_provider_missing_program_is_error() {
    let provider = LiveProcessProvider::new();
    let result = provider.execute("stager-definitely-missing-tool", &[], Path::new("."));
    assert!(result.is_err());
}
