use super::*;
use crate::graph::Target;
use crate::pipeline::{VersionSource, resolve_version};
use crate::primitives::{ConfigError, Configuration};
use crate::process::{MockProcessProvider, ProcessOutput};
use crate::testing::ProjectFixture;
use std::rc::Rc;

fn config_for(fixture: &ProjectFixture) -> AppConfig {
    let mut config = AppConfig {
        root: Some(fixture.path().to_path_buf()),
        ..AppConfig::default()
    };
    config.validate().unwrap();
    config
}

fn run_command(
    command: Commands,
    config: &AppConfig,
    process: &Rc<MockProcessProvider>,
) -> (Result<()>, String) {
    console::set_colors_enabled(false);
    let mut out = Vec::new();
    let result = execute_command_with_process(command, config, Box::new(Rc::clone(process)), &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn run_targets(targets: &[&str], skip: &[&str]) -> Commands {
    Commands::Run {
        targets: targets.iter().map(|s| s.to_string()).collect(),
        skip: skip.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_requested_targets_default_to_compile() {
    assert_eq!(requested_targets(&[]), vec!["Compile".to_string()]);
    assert_eq!(
        requested_targets(&["Package".to_string()]),
        vec!["Package".to_string()]
    );
}

#[test]
fn test_list_shows_standard_targets() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let process = Rc::new(MockProcessProvider::new());

    let (result, output) = run_command(Commands::List, &config_for(&fixture), &process);

    result.unwrap();
    assert!(output.starts_with("Targets\n"));
    for name in ["Clean", "Restore", "Compile", "Publish", "Package"] {
        assert!(output.contains(name), "missing {} in {}", name, output);
    }
    assert!(process.get_calls_for_subcommand("restore").is_empty());
}

#[test]
fn test_plan_prints_without_running() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let process = Rc::new(MockProcessProvider::new());
    let command = Commands::Plan {
        targets: vec!["Package".to_string()],
    };

    let (result, output) = run_command(command, &config_for(&fixture), &process);

    result.unwrap();
    assert_eq!(
        output,
        "Execution plan (4 targets)\n[1/4] Clean\n[2/4] Restore\n[3/4] Publish\n[4/4] Package\n"
    );
    assert!(process.get_calls_for_subcommand("publish").is_empty());
}

#[test]
fn test_plan_unknown_target_fails() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let process = Rc::new(MockProcessProvider::new());
    let command = Commands::Plan {
        targets: vec!["Deploy".to_string()],
    };

    let (result, output) = run_command(command, &config_for(&fixture), &process);

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::UnknownTarget { name, .. }) if name == "Deploy"
    ));
    assert!(output.is_empty());
}

#[test]
fn test_default_run_compiles_and_reports() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let process = Rc::new(MockProcessProvider::new());

    let (result, output) = run_command(Commands::default_run(), &config_for(&fixture), &process);

    result.unwrap();
    assert_eq!(process.subcommands(), vec!["describe", "restore", "build"]);
    let build = &process.get_calls_for_subcommand("build")[0];
    assert_eq!(build.flag_value("--configuration"), Some("Debug"));
    assert!(build.args.contains(&"-p:AssemblyVersion=0.1.0.0".to_string()));
    assert!(output.contains("✓ Restore"));
    assert!(output.contains("✓ Compile"));
    assert!(output.lines().last().unwrap().starts_with("Build succeeded in "));
}

#[test]
fn test_build_version_overrides_manifest() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let manifest = fixture.read_file("build.toml").unwrap();
    fixture
        .write_file("build.toml", &format!("version = \"2.0.0\"\n{}", manifest))
        .unwrap();
    let process = Rc::new(MockProcessProvider::new());
    let config = AppConfig {
        build_version: Some("3.1.4".to_string()),
        configuration: Some(Configuration::Release),
        ..config_for(&fixture)
    };

    let (result, _) = run_command(run_targets(&["Compile"], &[]), &config, &process);

    result.unwrap();
    assert!(process.get_calls_for_subcommand("describe").is_empty());
    let build = &process.get_calls_for_subcommand("build")[0];
    assert_eq!(build.flag_value("--configuration"), Some("Release"));
    assert!(build.args.contains(&"-p:InformationalVersion=3.1.4".to_string()));
}

#[test]
fn test_git_tag_version_names_the_archives() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let process = Rc::new(
        MockProcessProvider::new()
            .with_result(
                "git",
                &["describe", "--tags", "--abbrev=0"],
                Ok(ProcessOutput::succeeded("v1.4.0\n")),
            )
            .creating_publish_output(),
    );
    let config = config_for(&fixture);

    let (version, source) = resolve_version(None, None, config.root_dir(), &*process).unwrap();
    assert_eq!(version.to_string(), "1.4.0");
    assert_eq!(source, VersionSource::GitTag);

    let (result, _) = run_command(run_targets(&["Package"], &[]), &config, &process);

    result.unwrap();
    assert!(fixture.file_exists("output/artifacts/App/App-1.4.0.tar.gz"));
}

#[test]
fn test_failed_run_still_prints_summary() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let process = Rc::new(MockProcessProvider::new().fails_on("build", "error CS0103"));

    let (result, output) = run_command(run_targets(&["Compile"], &[]), &config_for(&fixture), &process);

    let err = result.unwrap_err();
    let build_error = err.downcast_ref::<BuildError>().unwrap();
    assert_eq!(build_error.failed_target(), Some("Compile"));
    assert!(output.contains("✓ Restore"));
    assert!(output.contains("✗ Compile"));
    assert!(output.lines().last().unwrap().starts_with("Build failed at Compile after "));
}

#[test]
fn test_skip_marks_target_done() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let process = Rc::new(MockProcessProvider::new());

    let (result, output) = run_command(
        run_targets(&["Compile"], &["Restore"]),
        &config_for(&fixture),
        &process,
    );

    result.unwrap();
    assert_eq!(process.subcommands(), vec!["describe", "build"]);
    assert!(output.contains("- Restore: skipped"));
}

#[test]
fn test_unknown_skip_target_is_rejected_before_running() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let process = Rc::new(MockProcessProvider::new());

    let (result, output) = run_command(
        run_targets(&["Compile"], &["Lint"]),
        &config_for(&fixture),
        &process,
    );

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::UnknownTarget { name, required_by: None }) if name == "Lint"
    ));
    assert!(process.get_calls_for_subcommand("restore").is_empty());
    assert!(output.is_empty());
}

#[test]
fn test_missing_manifest_is_config_error() {
    let fixture = ProjectFixture::new().unwrap();
    let process = Rc::new(MockProcessProvider::new());

    let (result, _) = run_command(Commands::List, &config_for(&fixture), &process);

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::ManifestNotFound { .. })
    ));
    assert!(process.get_calls().is_empty());
}

#[test]
fn test_invalid_build_version_is_rejected() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let process = Rc::new(MockProcessProvider::new());
    let config = AppConfig {
        build_version: Some("not-a-version".to_string()),
        ..config_for(&fixture)
    };

    let (result, _) = run_command(Commands::List, &config, &process);

    assert!(matches!(
        result.unwrap_err().downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidVersion { .. })
    ));
}

#[test]
fn test_cyclic_request_fails_without_running_processes() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let process = Rc::new(MockProcessProvider::new());
    let env = BuildEnv::new(
        fixture.context(Configuration::Debug, "1.0.0").unwrap(),
        Box::new(Rc::clone(&process)),
    );
    let restore = |env: &BuildEnv| env.toolchain().restore(env.context().solution());
    let mut registry = TargetRegistry::new();
    registry
        .register(Target::new("Restore").depends_on(["Compile"]).executes(restore))
        .unwrap();
    registry
        .register(Target::new("Compile").depends_on(["Restore"]).executes(restore))
        .unwrap();
    let mut status = StatusDisplay::new(Vec::new());

    let err = handle_run(&registry, &env, &["Compile".to_string()], Vec::new(), &mut status)
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::CyclicDependency { cycle }) if cycle == "Compile -> Restore -> Compile"
    ));
    assert!(process.get_calls().is_empty());
    assert!(status.into_inner().is_empty());
}
