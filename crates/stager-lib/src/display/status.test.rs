use super::*;
use crate::graph::{Runner, Target};
use crate::primitives::BuildError;

fn plain() -> StatusDisplay<Vec<u8>> {
    console::set_colors_enabled(false);
    StatusDisplay::new(Vec::new())
}

fn text(display: StatusDisplay<Vec<u8>>) -> String {
    String::from_utf8(display.into_inner()).unwrap()
}

fn registry() -> TargetRegistry<()> {
    let mut registry = TargetRegistry::new();
    registry
        .register(Target::new("Restore").description("Restore solution dependencies"))
        .unwrap();
    registry
        .register(
            Target::new("Compile")
                .description("Build the solution")
                .depends_on(["Restore"]),
        )
        .unwrap();
    registry
}

#[test]
fn test_status_lines() {
    let mut display = plain();
    display.success("Restore", "0.10s").unwrap();
    display.error("Compile", "").unwrap();
    display.skipped("Clean", "skipped").unwrap();
    display.info("using manifest build.toml").unwrap();

    assert_eq!(
        text(display),
        "✓ Restore: 0.10s\n✗ Compile\n- Clean: skipped\n· using manifest build.toml\n"
    );
}

#[test]
fn test_plan_is_numbered() {
    let registry = registry();
    let plan = registry.resolve("Compile").unwrap();
    let mut display = plain();

    display.plan(&plan).unwrap();

    assert_eq!(
        text(display),
        "Execution plan (2 targets)\n[1/2] Restore\n[2/2] Compile\n"
    );
}

#[test]
fn test_targets_listing_shows_dependencies() {
    let mut display = plain();
    display.targets(&registry()).unwrap();

    let output = text(display);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "Targets");
    assert!(lines[1].contains("Restore") && lines[1].contains("Restore solution dependencies"));
    assert!(!lines[1].contains("depends on"));
    assert!(lines[2].ends_with("(depends on: Restore)"));
}

#[test]
fn test_report_success_verdict() {
    let registry = registry();
    let mut runner = Runner::new(&registry);
    runner
        .execute(&registry.resolve("Compile").unwrap(), &())
        .unwrap();
    let mut display = plain();

    display.report(&runner.report()).unwrap();

    let output = text(display);
    assert!(output.starts_with("Summary\n✓ Restore: "));
    assert!(output.contains("✓ Compile: "));
    assert!(output.lines().last().unwrap().starts_with("Build succeeded in "));
}

#[test]
fn test_report_failure_verdict() {
    let mut registry: TargetRegistry<()> = TargetRegistry::new();
    registry
        .register(Target::new("Compile").executes(|_: &()| {
            Err(BuildError::MissingArtifact {
                pattern: "bin/*.dll".to_string(),
            })
        }))
        .unwrap();
    let mut runner = Runner::new(&registry);
    let _ = runner.execute(&registry.resolve("Compile").unwrap(), &());
    let mut display = plain();

    display.report(&runner.report()).unwrap();

    let output = text(display);
    assert!(output.contains("✗ Compile: "));
    assert!(output.lines().last().unwrap().starts_with("Build failed at Compile after "));
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_millis(420)), "0.42s");
    assert_eq!(format_duration(Duration::from_secs(65)), "1m 05s");
}
