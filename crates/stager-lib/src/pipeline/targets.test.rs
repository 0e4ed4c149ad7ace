use super::*;
use crate::graph::{Runner, TargetState};
use crate::pipeline::BuildEnv;
use crate::primitives::Configuration;
use crate::process::MockProcessProvider;
use crate::testing::ProjectFixture;
use std::fs;
use std::path::Path;
use std::rc::Rc;

fn build_env(fixture: &ProjectFixture, process: &Rc<MockProcessProvider>) -> BuildEnv {
    let context = fixture.context(Configuration::Release, "1.2.3").unwrap();
    BuildEnv::new(context, Box::new(Rc::clone(process)))
}

fn run(env: &BuildEnv, target: &str) -> BuildResult<()> {
    let registry = standard_targets(env.context())?;
    let plan = registry.resolve(target)?;
    Runner::new(&registry).execute(&plan, env)
}

#[test]
fn test_registration_order() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let context = fixture.context(Configuration::Debug, "1.0.0").unwrap();

    let registry = standard_targets(&context).unwrap();
    let names: Vec<&str> = registry.iter().map(|t| t.name()).collect();

    assert_eq!(names, vec![CLEAN, RESTORE, COMPILE, PUBLISH, PACKAGE]);
    assert!(registry.iter().all(|t| t.about().is_some()));
}

#[test]
fn test_standard_plans() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let context = fixture.context(Configuration::Debug, "1.0.0").unwrap();
    let registry = standard_targets(&context).unwrap();

    let plan = |name: &str| registry.resolve(name).unwrap().to_string();
    assert_eq!(plan(COMPILE), "Restore -> Compile");
    assert_eq!(plan(PUBLISH), "Clean -> Restore -> Publish");
    assert_eq!(plan(PACKAGE), "Clean -> Restore -> Publish -> Package");
    assert_eq!(plan(CLEAN), "Clean");
    assert_eq!(DEFAULT_TARGET, COMPILE);
}

#[test]
fn test_package_declares_one_pattern_per_project() {
    let fixture = ProjectFixture::with_projects(&["App", "Worker"]).unwrap();
    let context = fixture.context(Configuration::Debug, "1.0.0").unwrap();
    let registry = standard_targets(&context).unwrap();

    let outputs = registry.get(PACKAGE).unwrap().outputs();
    assert_eq!(
        outputs,
        [
            context.artifact_pattern_for("App"),
            context.artifact_pattern_for("Worker")
        ]
    );
}

#[test]
fn test_compile_invokes_restore_then_build() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let process = Rc::new(MockProcessProvider::new());
    let env = build_env(&fixture, &process);

    run(&env, COMPILE).unwrap();

    assert_eq!(process.subcommands(), vec!["restore", "build"]);
    let build = &process.get_calls_for_subcommand("build")[0];
    assert_eq!(build.working_dir, fixture.path());
    assert_eq!(build.flag_value("--configuration"), Some("Release"));
    assert!(build.args.contains(&"-p:AssemblyVersion=1.2.3.0".to_string()));
}

#[test]
fn test_package_produces_archive_per_project() {
    let fixture = ProjectFixture::with_projects(&["App", "Worker"]).unwrap();
    let process = Rc::new(MockProcessProvider::new().creating_publish_output());
    let env = build_env(&fixture, &process);

    run(&env, PACKAGE).unwrap();

    assert_eq!(process.subcommands(), vec!["restore", "publish", "publish"]);
    assert!(fixture.file_exists("output/publish/App/Dockerfile"));
    assert!(fixture.file_exists("output/publish/Worker/app.dll"));
    assert!(fixture.file_exists("output/artifacts/App/App-1.2.3.tar.gz"));
    assert!(fixture.file_exists("output/artifacts/Worker/Worker-1.2.3.tar.gz"));
}

#[test]
fn test_package_with_empty_publish_dir_is_missing_artifact() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    fs::remove_file(fixture.path().join("src/App/Dockerfile")).unwrap();
    let process = Rc::new(MockProcessProvider::new().on_subcommand("publish", |call| {
        if let Some(output) = call.flag_value("--output") {
            fs::create_dir_all(output).unwrap();
        }
    }));
    let env = build_env(&fixture, &process);

    let err = run(&env, PACKAGE).unwrap_err();

    assert_eq!(err.failed_target(), Some(PACKAGE));
    match err {
        BuildError::TargetFailed { source, .. } => {
            assert!(matches!(*source, BuildError::MissingArtifact { .. }))
        }
        other => panic!("Expected TargetFailed, got {:?}", other),
    }
    assert!(!fixture.file_exists("output/artifacts/App"));
}

#[test]
fn test_package_with_only_empty_subdirectories_is_missing_artifact() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    fs::remove_file(fixture.path().join("src/App/Dockerfile")).unwrap();
    let process = Rc::new(MockProcessProvider::new().on_subcommand("publish", |call| {
        if let Some(output) = call.flag_value("--output") {
            fs::create_dir_all(Path::new(output).join("runtimes")).unwrap();
        }
    }));
    let env = build_env(&fixture, &process);

    let err = run(&env, PACKAGE).unwrap_err();

    match err {
        BuildError::TargetFailed { target, source } => {
            assert_eq!(target, PACKAGE);
            assert!(matches!(*source, BuildError::MissingArtifact { .. }));
        }
        other => panic!("Expected TargetFailed, got {:?}", other),
    }
    assert!(!fixture.file_exists("output/artifacts/App/App-1.2.3.tar.gz"));
}

#[test]
fn test_package_with_missing_publish_dir_is_io_error() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    fs::remove_file(fixture.path().join("src/App/Dockerfile")).unwrap();
    let process = Rc::new(MockProcessProvider::new());
    let env = build_env(&fixture, &process);

    let err = run(&env, PACKAGE).unwrap_err();

    match err {
        BuildError::TargetFailed { target, source } => {
            assert_eq!(target, PACKAGE);
            assert!(matches!(*source, BuildError::Io { .. }));
        }
        other => panic!("Expected TargetFailed, got {:?}", other),
    }
}

#[test]
fn test_clean_is_idempotent() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    fixture.write_file("src/App/bin/Debug/App.dll", "dll").unwrap();
    fixture.write_file("src/App/obj/project.assets.json", "{}").unwrap();
    fixture.write_file("output/publish/App/stale.dll", "old").unwrap();
    let process = Rc::new(MockProcessProvider::new());
    let env = build_env(&fixture, &process);

    for _ in 0..2 {
        run(&env, CLEAN).unwrap();

        let output = fixture.path().join("output");
        assert!(output.is_dir());
        assert!(filesystem::is_empty_directory(&output).unwrap());
        assert!(!fixture.file_exists("src/App/bin"));
        assert!(!fixture.file_exists("src/App/obj"));
        assert!(fixture.file_exists("src/App/App.csproj"));
    }
    assert!(process.get_calls().is_empty());
}

#[test]
fn test_failed_compile_stops_the_run() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    let process = Rc::new(MockProcessProvider::new().fails_on("build", "error CS1002: ; expected"));
    let env = build_env(&fixture, &process);
    let registry = standard_targets(env.context()).unwrap();
    let mut runner = Runner::new(&registry);

    let err = runner
        .execute(&registry.resolve(COMPILE).unwrap(), &env)
        .unwrap_err();

    assert_eq!(err.failed_target(), Some(COMPILE));
    assert!(err.to_string().contains("error CS1002"));
    assert_eq!(runner.state(RESTORE), TargetState::Succeeded);
    assert_eq!(runner.state(COMPILE), TargetState::Failed);
}

#[test]
fn test_skipping_clean_keeps_existing_output() {
    let fixture = ProjectFixture::with_projects(&["App"]).unwrap();
    fixture.write_file("output/keep.txt", "keep").unwrap();
    let process = Rc::new(MockProcessProvider::new().creating_publish_output());
    let env = build_env(&fixture, &process);
    let registry = standard_targets(env.context()).unwrap();
    let mut runner = Runner::new(&registry).with_skip([CLEAN]);

    runner
        .execute(&registry.resolve(PUBLISH).unwrap(), &env)
        .unwrap();

    assert_eq!(runner.state(CLEAN), TargetState::Skipped);
    assert!(fixture.file_exists("output/keep.txt"));
    assert!(fixture.file_exists("output/publish/App/app.dll"));
}
