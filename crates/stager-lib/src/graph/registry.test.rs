use super::*;

#[test]
fn test_register_preserves_order() {
    let mut registry: TargetRegistry<()> = TargetRegistry::new();
    registry.register(Target::new("Clean")).unwrap();
    registry.register(Target::new("Restore")).unwrap();
    registry.register(Target::new("Compile")).unwrap();

    let names: Vec<&str> = registry.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["Clean", "Restore", "Compile"]);
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.registration_index("Compile"), Some(2));
}

#[test]
fn test_register_rejects_duplicate_names() {
    let mut registry: TargetRegistry<()> = TargetRegistry::new();
    registry.register(Target::new("Compile")).unwrap();

    let err = registry
        .register(Target::new("Compile").description("again"))
        .unwrap_err();
    assert!(matches!(err, BuildError::DuplicateTarget { ref name } if name == "Compile"));
    assert_eq!(registry.len(), 1);
    assert!(registry.get("Compile").unwrap().about().is_none());
}

#[test]
fn test_lookup_reports_requiring_target() {
    let registry: TargetRegistry<()> = TargetRegistry::default();
    assert!(registry.is_empty());
    assert!(!registry.contains("Compile"));

    let err = registry.lookup("Restore", Some("Compile")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Target 'Restore' is not declared (required by 'Compile')"
    );
}

#[test]
fn test_get_returns_declared_target() {
    let mut registry: TargetRegistry<()> = TargetRegistry::new();
    registry
        .register(
            Target::new("Package")
                .description("Create archives")
                .depends_on(["Publish"])
                .produces(["out/*.tar.gz"]),
        )
        .unwrap();

    let target = registry.get("Package").unwrap();
    assert_eq!(target.about(), Some("Create archives"));
    assert_eq!(target.dependencies(), ["Publish".to_string()]);
    assert_eq!(target.outputs(), ["out/*.tar.gz".to_string()]);
    assert!(registry.get("package").is_none());
}
