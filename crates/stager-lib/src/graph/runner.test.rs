use super::*;
use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;

#[derive(Default)]
struct Journal {
    entries: RefCell<Vec<String>>,
}

impl Journal {
    fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

fn recording(name: &str) -> Target<Journal> {
    let label = name.to_string();
    Target::new(name).executes(move |journal: &Journal| {
        journal.entries.borrow_mut().push(label.clone());
        Ok(())
    })
}

fn failing(name: &str) -> Target<Journal> {
    let label = name.to_string();
    Target::new(name).executes(move |journal: &Journal| {
        journal.entries.borrow_mut().push(label.clone());
        Err(BuildError::ExternalCommand {
            command: "dotnet build".to_string(),
            code: Some(1),
            stderr: "error CS1002: ; expected".to_string(),
        })
    })
}

fn registry(targets: Vec<Target<Journal>>) -> TargetRegistry<Journal> {
    let mut registry = TargetRegistry::new();
    for target in targets {
        registry.register(target).unwrap();
    }
    registry
}

#[test]
fn test_runs_plan_in_order() {
    let registry = registry(vec![
        recording("Restore"),
        recording("Compile").depends_on(["Restore"]),
    ]);
    let journal = Journal::default();
    let mut runner = Runner::new(&registry);

    let plan = registry.resolve("Compile").unwrap();
    runner.execute(&plan, &journal).unwrap();

    assert_eq!(journal.entries(), vec!["Restore", "Compile"]);
    assert_eq!(runner.state("Restore"), TargetState::Succeeded);
    assert_eq!(runner.state("Compile"), TargetState::Succeeded);
    assert_eq!(runner.report().executed(), vec!["Restore", "Compile"]);
    assert!(runner.report().failed().is_none());
}

#[test]
fn test_target_runs_at_most_once_per_runner() {
    let registry = registry(vec![
        recording("Restore"),
        recording("Compile").depends_on(["Restore"]),
        recording("Publish").depends_on(["Restore"]),
    ]);
    let journal = Journal::default();
    let mut runner = Runner::new(&registry);

    runner
        .execute(&registry.resolve("Compile").unwrap(), &journal)
        .unwrap();
    runner
        .execute(&registry.resolve("Publish").unwrap(), &journal)
        .unwrap();
    runner
        .execute(&registry.resolve("Compile").unwrap(), &journal)
        .unwrap();

    assert_eq!(journal.entries(), vec!["Restore", "Compile", "Publish"]);
    assert_eq!(runner.report().outcomes().len(), 3);
}

#[test]
fn test_failure_stops_remaining_targets() {
    let registry = registry(vec![
        recording("Restore"),
        failing("Compile").depends_on(["Restore"]),
        recording("Package").depends_on(["Compile"]),
    ]);
    let journal = Journal::default();
    let mut runner = Runner::new(&registry);

    let err = runner
        .execute(&registry.resolve("Package").unwrap(), &journal)
        .unwrap_err();

    assert_eq!(err.failed_target(), Some("Compile"));
    assert!(matches!(
        err,
        BuildError::TargetFailed { ref source, .. }
            if matches!(**source, BuildError::ExternalCommand { code: Some(1), .. })
    ));
    assert_eq!(journal.entries(), vec!["Restore", "Compile"]);
    assert_eq!(runner.state("Compile"), TargetState::Failed);
    assert_eq!(runner.state("Package"), TargetState::Pending);

    let report = runner.report();
    assert_eq!(report.failed().map(|o| o.name.as_str()), Some("Compile"));
    assert_eq!(report.executed(), vec!["Restore", "Compile"]);
}

#[test]
fn test_failed_target_is_not_retried() {
    let registry = registry(vec![
        failing("Compile"),
        recording("Package").depends_on(["Compile"]),
    ]);
    let journal = Journal::default();
    let mut runner = Runner::new(&registry);

    let plan = registry.resolve("Package").unwrap();
    runner.execute(&plan, &journal).unwrap_err();
    let err = runner.execute(&plan, &journal).unwrap_err();

    assert!(matches!(err, BuildError::PreviouslyFailed { ref target } if target == "Compile"));
    assert_eq!(journal.entries(), vec!["Compile"]);
}

#[test]
fn test_skipped_targets_satisfy_dependents() {
    let registry = registry(vec![
        recording("Clean"),
        recording("Restore"),
        recording("Publish").depends_on(["Clean", "Restore"]),
    ]);
    let journal = Journal::default();
    let mut runner = Runner::new(&registry).with_skip(["Clean"]);

    runner
        .execute(&registry.resolve("Publish").unwrap(), &journal)
        .unwrap();

    assert_eq!(journal.entries(), vec!["Restore", "Publish"]);
    assert_eq!(runner.state("Clean"), TargetState::Skipped);
    assert_eq!(runner.report().executed(), vec!["Restore", "Publish"]);
    assert_eq!(runner.report().outcomes()[0].state, TargetState::Skipped);
}

#[test]
fn test_cyclic_graph_runs_no_action() {
    let registry = registry(vec![
        recording("Restore").depends_on(["Compile"]),
        recording("Compile").depends_on(["Restore"]),
        recording("Clean"),
    ]);
    let journal = Journal::default();
    let mut runner = Runner::new(&registry);

    let err = registry
        .resolve_all(&["Clean", "Compile"])
        .and_then(|plan| runner.execute(&plan, &journal))
        .unwrap_err();

    assert!(matches!(err, BuildError::CyclicDependency { .. }));
    assert!(journal.entries().is_empty());
    assert!(runner.report().outcomes().is_empty());
    assert_eq!(runner.state("Clean"), TargetState::Pending);
}

#[test]
fn test_target_without_action_succeeds() {
    let registry = registry(vec![
        recording("Compile"),
        Target::new("Default").depends_on(["Compile"]),
    ]);
    let journal = Journal::default();
    let mut runner = Runner::new(&registry);

    runner
        .execute(&registry.resolve("Default").unwrap(), &journal)
        .unwrap();
    assert_eq!(runner.state("Default"), TargetState::Succeeded);
}

#[test]
fn test_missing_declared_output_fails_target() {
    let temp = TempDir::new().unwrap();
    let pattern = format!("{}/artifacts/App/App*.tar.gz", temp.path().display());
    let registry = registry(vec![recording("Package").produces([pattern.clone()])]);
    let journal = Journal::default();
    let mut runner = Runner::new(&registry);

    let err = runner
        .execute(&registry.resolve("Package").unwrap(), &journal)
        .unwrap_err();

    match err {
        BuildError::TargetFailed { target, source } => {
            assert_eq!(target, "Package");
            assert!(matches!(*source, BuildError::MissingArtifact { pattern: ref p } if *p == pattern));
        }
        other => panic!("Expected TargetFailed, got {:?}", other),
    }
    assert_eq!(runner.state("Package"), TargetState::Failed);
}

#[test]
fn test_present_declared_output_passes() {
    let temp = TempDir::new().unwrap();
    let artifacts = temp.path().join("artifacts/App");
    let pattern = format!("{}/App*.tar.gz", artifacts.display());
    let archive = artifacts.join("App-1.0.0.tar.gz");
    let registry = registry(vec![
        Target::new("Package")
            .produces([pattern])
            .executes(move |_: &Journal| {
                fs::create_dir_all(archive.parent().unwrap())
                    .map_err(|e| BuildError::io(&archive, e))?;
                fs::write(&archive, b"gz").map_err(|e| BuildError::io(&archive, e))
            }),
    ]);
    let journal = Journal::default();
    let mut runner = Runner::new(&registry);

    runner
        .execute(&registry.resolve("Package").unwrap(), &journal)
        .unwrap();
    assert_eq!(runner.state("Package"), TargetState::Succeeded);
}

#[test]
fn test_target_state_labels() {
    assert_eq!(TargetState::Pending.to_string(), "pending");
    assert_eq!(TargetState::Skipped.to_string(), "skipped");
    assert!(!TargetState::Running.is_terminal());
    assert!(TargetState::Failed.is_terminal());
}
