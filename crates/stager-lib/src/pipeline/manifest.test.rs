use super::*;
use tempfile::TempDir;

fn origin() -> &'static Path {
    Path::new("build.toml")
}

#[test]
fn test_parse_full_manifest() {
    let content = r#"
solution = "src/App.sln"
toolchain = "dotnet"
source-dir = "src"
output-dir = "out"
version = "2.1.0"

[[projects]]
name = "App.ConsoleApp"
path = "src/App.ConsoleApp/App.ConsoleApp.csproj"

[[projects]]
name = "App.Worker"
"#;

    let manifest = Manifest::parse(content, origin()).unwrap();

    assert_eq!(manifest.solution, Some(PathBuf::from("src/App.sln")));
    assert_eq!(manifest.output_dir, PathBuf::from("out"));
    assert_eq!(manifest.version.as_deref(), Some("2.1.0"));
    assert_eq!(manifest.projects.len(), 2);
    assert_eq!(
        manifest.project_file(&manifest.projects[1]),
        PathBuf::from("src/App.Worker/App.Worker.csproj")
    );
}

#[test]
fn test_parse_empty_manifest_uses_defaults() {
    let manifest = Manifest::parse("", origin()).unwrap();

    assert_eq!(manifest, Manifest::default());
    assert_eq!(manifest.toolchain, "dotnet");
    assert_eq!(manifest.solution_path(), PathBuf::from("src"));
}

#[test]
fn test_default_project_file_uses_trimmed_name() {
    let manifest = Manifest::parse("[[projects]]\nname = \" App \"\n", origin()).unwrap();

    assert_eq!(
        manifest.project_file(&manifest.projects[0]),
        PathBuf::from("src/App/App.csproj")
    );
}

#[test]
fn test_parse_rejects_invalid_toml() {
    let err = Manifest::parse("solution = ", origin()).unwrap_err();
    assert!(matches!(err, ConfigError::ManifestParseError { ref path, .. } if path == origin()));
}

#[test]
fn test_parse_rejects_unknown_keys() {
    let err = Manifest::parse("solutoin = \"App.sln\"", origin()).unwrap_err();
    assert!(matches!(err, ConfigError::ManifestParseError { .. }));
}

#[test]
fn test_validate_rejects_duplicate_projects() {
    let content = r#"
[[projects]]
name = "App"

[[projects]]
name = "App"
"#;

    let err = Manifest::parse(content, origin()).unwrap_err();
    match err {
        ConfigError::ValidationFailed { reason } => assert!(reason.contains("duplicate")),
        other => panic!("Expected ValidationFailed, got {:?}", other),
    }
}

#[test]
fn test_validate_rejects_empty_and_nested_names() {
    let empty = Manifest::parse("[[projects]]\nname = \" \"\n", origin()).unwrap_err();
    assert!(matches!(empty, ConfigError::ValidationFailed { .. }));

    let nested = Manifest::parse("[[projects]]\nname = \"src/App\"\n", origin()).unwrap_err();
    assert!(matches!(nested, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_load_missing_manifest() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(MANIFEST_FILE_NAME);

    let err = Manifest::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ManifestNotFound { path: ref p } if *p == path));
}

#[test]
fn test_load_reads_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(MANIFEST_FILE_NAME);
    fs::write(&path, "[[projects]]\nname = \"App\"\n").unwrap();

    let manifest = Manifest::load(&path).unwrap();
    assert_eq!(manifest.projects[0].name, "App");
    assert_eq!(manifest.projects[0].path, None);
}
