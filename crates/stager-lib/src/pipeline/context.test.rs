use super::*;
use crate::filesystem::wildcard_match;
use crate::pipeline::manifest::ProjectEntry;

fn context() -> RunContext {
    let manifest = Manifest {
        solution: Some(PathBuf::from("src/App.sln")),
        projects: vec![
            ProjectEntry {
                name: "App.ConsoleApp".to_string(),
                path: None,
            },
            ProjectEntry {
                name: "App.Worker".to_string(),
                path: Some(PathBuf::from("services/worker/Worker.csproj")),
            },
        ],
        ..Manifest::default()
    };
    RunContext::new(
        Path::new("/repo"),
        &manifest,
        Configuration::Release,
        VersionInfo::parse("1.2.3").unwrap(),
    )
}

#[test]
fn test_paths_resolve_against_root() {
    let ctx = context();

    assert_eq!(ctx.root(), Path::new("/repo"));
    assert_eq!(ctx.source_dir(), Path::new("/repo/src"));
    assert_eq!(ctx.output_dir(), Path::new("/repo/output"));
    assert_eq!(ctx.solution(), Path::new("/repo/src/App.sln"));
    assert_eq!(ctx.toolchain(), "dotnet");
    assert_eq!(ctx.configuration(), Configuration::Release);
}

#[test]
fn test_project_files_and_directories() {
    let ctx = context();
    let projects = ctx.projects();

    assert_eq!(
        projects[0].file,
        PathBuf::from("/repo/src/App.ConsoleApp/App.ConsoleApp.csproj")
    );
    assert_eq!(projects[0].directory(), Path::new("/repo/src/App.ConsoleApp"));
    assert_eq!(projects[1].directory(), Path::new("/repo/services/worker"));
}

#[test]
fn test_artifact_layout() {
    let ctx = context();

    assert_eq!(
        ctx.publish_dir_for("App.Worker"),
        PathBuf::from("/repo/output/publish/App.Worker")
    );
    assert_eq!(
        ctx.artifact_dir_for("App.Worker"),
        PathBuf::from("/repo/output/artifacts/App.Worker")
    );
    assert_eq!(ctx.archive_root_name("App.Worker"), "App.Worker-1.2.3");
    assert_eq!(
        ctx.archive_path_for("App.Worker"),
        PathBuf::from("/repo/output/artifacts/App.Worker/App.Worker-1.2.3.tar.gz")
    );
}

#[test]
fn test_archive_name_matches_declared_pattern() {
    let ctx = context();
    let pattern = ctx.artifact_pattern_for("App.ConsoleApp");
    let archive = ctx.archive_path_for("App.ConsoleApp");

    assert!(pattern.ends_with("App.ConsoleApp*.tar.gz"));
    let file_name = archive.file_name().unwrap().to_string_lossy();
    assert!(wildcard_match("App.ConsoleApp*.tar.gz", &file_name));
}
