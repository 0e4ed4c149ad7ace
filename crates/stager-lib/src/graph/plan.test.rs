use super::*;
use crate::graph::Target;

fn registry(targets: Vec<Target<()>>) -> TargetRegistry<()> {
    let mut registry = TargetRegistry::new();
    for target in targets {
        registry.register(target).unwrap();
    }
    registry
}

fn names(plan: &ExecutionPlan) -> Vec<&str> {
    plan.iter().collect()
}

#[test]
fn test_prerequisites_run_before_dependents() {
    let registry = registry(vec![
        Target::new("Package").depends_on(["Publish"]),
        Target::new("Publish").depends_on(["Restore"]),
        Target::new("Restore"),
    ]);

    let plan = registry.resolve("Package").unwrap();
    assert_eq!(names(&plan), vec!["Restore", "Publish", "Package"]);
    assert_eq!(plan.to_string(), "Restore -> Publish -> Package");
}

#[test]
fn test_unrelated_targets_are_excluded() {
    let registry = registry(vec![
        Target::new("Clean"),
        Target::new("Restore"),
        Target::new("Compile").depends_on(["Restore"]),
    ]);

    let plan = registry.resolve("Compile").unwrap();
    assert_eq!(names(&plan), vec!["Restore", "Compile"]);
    assert!(!plan.contains("Clean"));
}

#[test]
fn test_diamond_includes_shared_prerequisite_once() {
    let registry = registry(vec![
        Target::new("A"),
        Target::new("B").depends_on(["A"]),
        Target::new("C").depends_on(["A"]),
        Target::new("D").depends_on(["B", "C"]),
    ]);

    let plan = registry.resolve("D").unwrap();
    assert_eq!(names(&plan), vec!["A", "B", "C", "D"]);
    assert_eq!(plan.len(), 4);
}

#[test]
fn test_independent_targets_follow_registration_order() {
    // Declared dependency order is the reverse of registration order.
    let registry = registry(vec![
        Target::new("Clean"),
        Target::new("Restore"),
        Target::new("Publish").depends_on(["Restore", "Clean"]),
    ]);

    let plan = registry.resolve("Publish").unwrap();
    assert_eq!(names(&plan), vec!["Clean", "Restore", "Publish"]);
}

#[test]
fn test_resolution_is_deterministic() {
    let build = || {
        registry(vec![
            Target::new("A"),
            Target::new("B"),
            Target::new("C"),
            Target::new("All").depends_on(["C", "A", "B"]),
        ])
    };

    let first = build().resolve("All").unwrap();
    for _ in 0..10 {
        assert_eq!(build().resolve("All").unwrap(), first);
    }
    assert_eq!(names(&first), vec!["A", "B", "C", "All"]);
}

#[test]
fn test_before_edge_orders_members_without_pulling_them_in() {
    let registry = registry(vec![
        Target::new("Restore"),
        Target::new("Clean").before(["Restore"]),
        Target::new("Publish").depends_on(["Restore", "Clean"]),
    ]);

    let plan = registry.resolve("Publish").unwrap();
    assert_eq!(names(&plan), vec!["Clean", "Restore", "Publish"]);

    let restore_only = registry.resolve("Restore").unwrap();
    assert_eq!(names(&restore_only), vec!["Restore"]);
}

#[test]
fn test_after_edge_orders_members() {
    let registry = registry(vec![
        Target::new("Report").after(["Test"]),
        Target::new("Test"),
        Target::new("All").depends_on(["Report", "Test"]),
    ]);

    let plan = registry.resolve("All").unwrap();
    assert_eq!(names(&plan), vec!["Test", "Report", "All"]);
}

#[test]
fn test_resolve_all_merges_requests() {
    let registry = registry(vec![
        Target::new("Clean"),
        Target::new("Restore"),
        Target::new("Compile").depends_on(["Restore"]),
    ]);

    let plan = registry.resolve_all(&["Compile", "Clean", "Restore"]).unwrap();
    assert_eq!(names(&plan), vec!["Clean", "Restore", "Compile"]);
}

#[test]
fn test_unknown_requested_target() {
    let registry = registry(vec![Target::new("Compile")]);

    let err = registry.resolve("Deploy").unwrap_err();
    match err {
        BuildError::UnknownTarget { name, required_by } => {
            assert_eq!(name, "Deploy");
            assert!(required_by.is_none());
        }
        other => panic!("Expected UnknownTarget, got {:?}", other),
    }
}

#[test]
fn test_unknown_dependency_names_parent() {
    let registry = registry(vec![Target::new("Compile").depends_on(["Restore"])]);

    let err = registry.resolve("Compile").unwrap_err();
    match err {
        BuildError::UnknownTarget { name, required_by } => {
            assert_eq!(name, "Restore");
            assert_eq!(required_by.as_deref(), Some("Compile"));
        }
        other => panic!("Expected UnknownTarget, got {:?}", other),
    }
}

#[test]
fn test_unknown_before_target_is_rejected() {
    let registry = registry(vec![Target::new("Clean").before(["Restor"])]);

    let err = registry.resolve("Clean").unwrap_err();
    match err {
        BuildError::UnknownTarget { name, required_by } => {
            assert_eq!(name, "Restor");
            assert_eq!(required_by.as_deref(), Some("Clean"));
        }
        other => panic!("Expected UnknownTarget, got {:?}", other),
    }
}

#[test]
fn test_unknown_after_target_is_rejected() {
    let registry = registry(vec![
        Target::new("Test"),
        Target::new("Report").after(["Tset"]).depends_on(["Test"]),
    ]);

    let err = registry.resolve("Report").unwrap_err();
    assert!(matches!(
        err,
        BuildError::UnknownTarget { ref name, required_by: Some(ref parent) }
            if name == "Tset" && parent == "Report"
    ));
}

#[test]
fn test_dependency_cycle_is_reported_with_path() {
    let registry = registry(vec![
        Target::new("A").depends_on(["B"]),
        Target::new("B").depends_on(["A"]),
    ]);

    let err = registry.resolve("A").unwrap_err();
    match err {
        BuildError::CyclicDependency { cycle } => assert_eq!(cycle, "A -> B -> A"),
        other => panic!("Expected CyclicDependency, got {:?}", other),
    }
}

#[test]
fn test_self_dependency_is_a_cycle() {
    let registry = registry(vec![Target::new("Loop").depends_on(["Loop"])]);

    let err = registry.resolve("Loop").unwrap_err();
    assert_eq!(err.to_string(), "Circular dependency detected: Loop -> Loop");
}

#[test]
fn test_longer_cycle_reported_from_entry_point() {
    let registry = registry(vec![
        Target::new("A").depends_on(["B"]),
        Target::new("B").depends_on(["C"]),
        Target::new("C").depends_on(["B"]),
    ]);

    let err = registry.resolve("A").unwrap_err();
    match err {
        BuildError::CyclicDependency { cycle } => assert_eq!(cycle, "B -> C -> B"),
        other => panic!("Expected CyclicDependency, got {:?}", other),
    }
}

#[test]
fn test_conflicting_soft_ordering_is_a_cycle() {
    let registry = registry(vec![
        Target::new("A").before(["B"]),
        Target::new("B").before(["A"]),
        Target::new("All").depends_on(["A", "B"]),
    ]);

    let err = registry.resolve("All").unwrap_err();
    match err {
        BuildError::CyclicDependency { cycle } => assert_eq!(cycle, "A -> B -> A"),
        other => panic!("Expected CyclicDependency, got {:?}", other),
    }
}

#[test]
fn test_plan_position_lookup() {
    let registry = registry(vec![
        Target::new("Restore"),
        Target::new("Compile").depends_on(["Restore"]),
    ]);

    let plan = registry.resolve("Compile").unwrap();
    assert_eq!(plan.position("Restore"), Some(0));
    assert_eq!(plan.position("Compile"), Some(1));
    assert_eq!(plan.position("Clean"), None);
    assert_eq!(plan.targets(), ["Restore".to_string(), "Compile".to_string()]);
}
